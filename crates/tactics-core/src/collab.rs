//! External Collaborators
//!
//! Random choice, line input and text output sit behind small traits so the
//! pipeline can be driven by a seeded RNG and scripted input in tests, and by
//! stdin/stdout in the binary.

use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Uniform random choice.
pub trait Chooser {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Picks one of `candidates` uniformly, `None` when there are none.
pub fn choice<'a, T>(chooser: &mut dyn Chooser, candidates: &'a [T]) -> Option<&'a T> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(chooser.choose_index(candidates.len()))
}

/// Seeded random number generator
#[derive(Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Chooser for SimRng {
    fn choose_index(&mut self, len: usize) -> usize {
        (0..len).choose(&mut self.0).unwrap_or_default()
    }
}

/// Source of input lines.
pub trait LineSource {
    /// Next line without its terminator, `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Lines from any buffered reader, e.g. locked stdin.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl ReaderInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineSource for ReaderInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Pre-recorded input lines
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// In-memory output that stays readable after being handed to a world.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Everything outside the core that systems may call during a tick.
pub struct Collaborators {
    pub chooser: Box<dyn Chooser>,
    pub input: Box<dyn LineSource>,
    pub output: Box<dyn Write>,
}

impl Collaborators {
    pub fn new(
        chooser: impl Chooser + 'static,
        input: impl LineSource + 'static,
        output: impl Write + 'static,
    ) -> Self {
        Self {
            chooser: Box::new(chooser),
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Seeded RNG, stdin and stdout.
    pub fn terminal(seed: u64) -> Self {
        Self::new(SimRng::seeded(seed), ReaderInput::stdin(), io::stdout())
    }

    /// Seeded RNG, scripted input, output discarded.
    pub fn headless(seed: u64, input: ScriptedInput) -> Self {
        Self::new(SimRng::seeded(seed), input, io::sink())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_empty_is_none() {
        let mut rng = SimRng::seeded(1);
        let empty: [u8; 0] = [];
        assert!(choice(&mut rng, &empty).is_none());
    }

    #[test]
    fn test_choose_index_stays_in_range() {
        let mut rng = SimRng::seeded(99);
        assert_eq!(rng.choose_index(1), 0);
        for len in 1..20 {
            for _ in 0..50 {
                assert!(rng.choose_index(len) < len);
            }
        }
    }

    #[test]
    fn test_choice_is_deterministic() {
        let candidates: Vec<u32> = (0..8).collect();
        let mut rng1 = SimRng::seeded(12345);
        let mut rng2 = SimRng::seeded(12345);

        let picks1: Vec<_> = (0..50).map(|_| *choice(&mut rng1, &candidates).unwrap()).collect();
        let picks2: Vec<_> = (0..50).map(|_| *choice(&mut rng2, &candidates).unwrap()).collect();
        assert_eq!(picks1, picks2);
    }

    #[test]
    fn test_choice_covers_all_candidates() {
        let candidates = ['a', 'b', 'c', 'd'];
        let mut rng = SimRng::seeded(7);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let picked = choice(&mut rng, &candidates).unwrap();
            let index = candidates.iter().position(|c| c == picked).unwrap();
            counts[index] += 1;
        }
        // Roughly uniform: each ~1000
        assert!(counts.iter().all(|&n| n > 800 && n < 1200), "{:?}", counts);
    }

    #[test]
    fn test_reader_input_strips_newlines() {
        let mut input = ReaderInput::new("wa\r\nsd\n\nlast".as_bytes());
        assert_eq!(input.read_line().unwrap().as_deref(), Some("wa"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("sd"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_scripted_input_drains() {
        let mut input = ScriptedInput::new(["w", "d"]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("w"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("d"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn test_shared_buffer_visible_through_clone() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        write!(writer, "board").unwrap();
        assert_eq!(buffer.contents(), "board");
    }
}
