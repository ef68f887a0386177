use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// The two byte primitives a running program calls.
pub trait ByteIo {
    /// Write one byte. An error aborts the program.
    fn output_byte(&mut self, value: u8) -> io::Result<()>;

    /// Read one byte, `None` at end of input. An error aborts the program.
    fn input_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<T: ByteIo + ?Sized> ByteIo for &mut T {
    fn output_byte(&mut self, value: u8) -> io::Result<()> {
        (**self).output_byte(value)
    }

    fn input_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).input_byte()
    }
}

/// Process stdin/stdout. Each output byte is flushed at once so interactive
/// programs show their prompts before blocking on input.
pub struct StdIo {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdIo {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdIo {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteIo for StdIo {
    fn output_byte(&mut self, value: u8) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(&[value])?;
        out.flush()
    }

    fn input_byte(&mut self) -> io::Result<Option<u8>> {
        read_one(&mut self.stdin.lock())
    }
}

fn read_one(reader: &mut impl Read) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// In-memory input and captured output.
#[derive(Debug, Default, Clone)]
pub struct BufferIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl BufferIo {
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: VecDeque::from(input.into()),
            output: Vec::new(),
        }
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}

impl ByteIo for BufferIo {
    fn output_byte(&mut self, value: u8) -> io::Result<()> {
        self.output.push(value);
        Ok(())
    }

    fn input_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_io() {
        let mut io = BufferIo::new("ab");
        assert_eq!(io.input_byte().unwrap(), Some(b'a'));
        assert_eq!(io.input_byte().unwrap(), Some(b'b'));
        assert_eq!(io.input_byte().unwrap(), None);

        io.output_byte(b'x').unwrap();
        io.output_byte(0).unwrap();
        assert_eq!(io.output(), b"x\0");
    }

    #[test]
    fn test_read_one_from_reader() {
        let mut reader: &[u8] = b"z";
        assert_eq!(read_one(&mut reader).unwrap(), Some(b'z'));
        assert_eq!(read_one(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn echo(mut io: impl ByteIo) {
            while let Some(b) = io.input_byte().unwrap() {
                io.output_byte(b).unwrap();
            }
        }

        let mut io = BufferIo::new(vec![1u8, 2]);
        echo(&mut io);
        assert_eq!(io.into_output(), vec![1, 2]);
    }
}
