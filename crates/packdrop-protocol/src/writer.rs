use std::io::{self, Write};

use packdrop_engine::GameMove;

/// Writes agent replies to the judge.
///
/// Every line is flushed as soon as it is written; the judge waits for each
/// reply before sending the next record.
#[derive(Debug)]
pub struct JudgeWriter<W> {
    output: W,
}

impl<W> JudgeWriter<W>
where
    W: Write,
{
    #[must_use]
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Sends the agent name line. Anything after the first line break is
    /// dropped so the name stays a single protocol line.
    pub fn announce(&mut self, name: &str) -> io::Result<()> {
        let name = name.lines().next().unwrap_or_default();
        writeln!(self.output, "{name}")?;
        self.output.flush()
    }

    /// Sends a move as `"<position> <rotation>"`.
    pub fn send_move(&mut self, chosen: GameMove) -> io::Result<()> {
        writeln!(self.output, "{chosen}")?;
        self.output.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use packdrop_engine::PackRotation;

    use super::*;

    #[test]
    fn test_announce_and_moves() {
        let mut writer = JudgeWriter::new(Vec::new());
        writer.announce("packdrop").unwrap();
        writer.send_move(GameMove::new(3, PackRotation::ALL[1])).unwrap();
        writer.send_move(GameMove::default()).unwrap();
        assert_eq!(writer.into_inner(), b"packdrop\n3 1\n0 0\n");
    }

    #[test]
    fn test_announce_keeps_first_line() {
        let mut writer = JudgeWriter::new(Vec::new());
        writer.announce("agent\nextra").unwrap();
        assert_eq!(writer.into_inner(), b"agent\n");
    }
}
