use bfc::bytecode::artifact::Artifact;
use bfc::bytecode::{CompileError, FunctionGraph};
use bfc::runtime::{BufferIo, Vm};
use pretty_assertions::assert_eq;

const HELLO: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";

const HELLO_WORLD: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

fn run(source: &str, input: &[u8]) -> Vec<u8> {
    let graph = bfc::compile(source).expect("source should compile");
    run_graph(&graph, input)
}

fn run_graph(graph: &FunctionGraph, input: &[u8]) -> Vec<u8> {
    let mut vm = Vm::new(BufferIo::new(input));
    vm.run(graph).expect("program should run");
    vm.into_io().into_output()
}

/// Reference interpreter: 4096 zeroed cells, wrapping arithmetic, EOF as 0.
fn interpret(source: &str, input: &[u8]) -> Vec<u8> {
    let prog: Vec<char> = source.chars().filter(|c| "<>+-.,[]".contains(*c)).collect();
    let mut matching = vec![0; prog.len()];
    let mut stack = Vec::new();
    for (i, &c) in prog.iter().enumerate() {
        if c == '[' {
            stack.push(i);
        } else if c == ']' {
            let open = stack.pop().unwrap();
            matching[open] = i;
            matching[i] = open;
        }
    }

    let mut tape = vec![0u8; 4096];
    let mut ptr = 0usize;
    let mut input = input.iter();
    let mut out = Vec::new();
    let mut pc = 0;
    while pc < prog.len() {
        match prog[pc] {
            '>' => ptr += 1,
            '<' => ptr -= 1,
            '+' => tape[ptr] = tape[ptr].wrapping_add(1),
            '-' => tape[ptr] = tape[ptr].wrapping_sub(1),
            '.' => out.push(tape[ptr]),
            ',' => tape[ptr] = input.next().copied().unwrap_or(0),
            '[' if tape[ptr] == 0 => pc = matching[pc],
            ']' if tape[ptr] != 0 => pc = matching[pc],
            _ => {}
        }
        pc += 1;
    }
    out
}

#[test]
fn hello_round_trip() {
    assert_eq!(run(HELLO, b""), b"Hello");
}

#[test]
fn hello_world_round_trip() {
    assert_eq!(run(HELLO_WORLD, b""), b"Hello World!\n");
}

#[test]
fn matches_reference_interpreter_on_flat_loops() {
    let programs = [
        "+++.>++.<.",
        "++++[->+++<]>.",
        ",[.,]",
        "-.>-.<[-]>[-]+.",
        "+++++[>+++++<-]>[>++<-]>.",
        ",>,<[->+<]>.",
    ];
    for source in programs {
        assert_eq!(
            run(source, b"\x03\x04xyz"),
            interpret(source, b"\x03\x04xyz"),
            "program {:?}",
            source
        );
    }
}

#[test]
fn matches_reference_interpreter_on_nested_loops() {
    let source = "++[>++[>++[>+<-]<-]<-]>>>.";
    assert_eq!(run(source, b""), interpret(source, b""));
    assert_eq!(run(source, b""), vec![8]);
}

#[test]
fn unmatched_close_reports_its_position() {
    for (source, p) in [("]", 0), ("+[-]]", 4), ("ab\n]", 3), ("é]", 1)] {
        match bfc::compile(source) {
            Err(err @ CompileError::UnmatchedClose { .. }) => {
                assert_eq!(err.offset(), Some(p), "source {:?}", source)
            }
            other => panic!("expected UnmatchedClose for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn nesting_beyond_one_hundred_fails() {
    let source = format!("{}{}", "[".repeat(101), "]".repeat(101));
    assert!(matches!(
        bfc::compile(&source),
        Err(CompileError::LoopNestingExceeded { max: 100, .. })
    ));

    let source = format!("{}{}", "[".repeat(100), "]".repeat(100));
    assert!(bfc::compile(&source).is_ok());
}

#[test]
fn unclosed_loops_fail() {
    for source in ["[", "+[->+<", "[[]", "[][[]"] {
        assert!(
            matches!(bfc::compile(source), Err(CompileError::UnclosedLoop { .. })),
            "source {:?}",
            source
        );
    }
}

#[test]
fn translation_is_idempotent() {
    let first = bfc::compile(HELLO_WORLD).unwrap();
    let second = bfc::compile(HELLO_WORLD).unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first, second);
}

#[test]
fn translations_on_separate_threads_do_not_interfere() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| bfc::compile(HELLO_WORLD).unwrap()))
        .collect();
    let expected = bfc::compile(HELLO_WORLD).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn non_symbol_characters_are_ignored() {
    let noisy: String = HELLO_WORLD
        .chars()
        .flat_map(|c| [c, ' ', 'x', '\n', 'é'])
        .collect();
    assert_eq!(run(&noisy, b""), run(HELLO_WORLD, b""));
    assert_eq!(bfc::compile(&noisy).unwrap(), bfc::compile(HELLO_WORLD).unwrap());
}

#[test]
fn artifact_behaves_like_immediate_execution() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.bfo");

    Artifact::new(bfc::compile(HELLO_WORLD).unwrap())
        .write_to(&path)
        .unwrap();
    let loaded = Artifact::read_from(&path).unwrap().into_graph();

    assert_eq!(run_graph(&loaded, b""), b"Hello World!\n");
}

#[test]
fn failed_translation_produces_nothing() {
    let result: Result<FunctionGraph, _> = bfc::compile("+++]");
    assert!(result.is_err());
}
