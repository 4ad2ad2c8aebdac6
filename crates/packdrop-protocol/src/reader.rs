use std::{io::BufRead, str::FromStr};

use packdrop_engine::{
    BOARD_WIDTH, Board, BoardShapeError, MAX_TURN, PACK_SIZE, Pack, PackSequence, PlayerState,
    TurnContext, TurnState, VISIBLE_HEIGHT,
};

use crate::{FormatErrorKind, ProtocolError, ProtocolFormatError};

/// Parses judge records from a line-oriented input stream.
///
/// Every record is a fixed number of lines; a record that ends early or
/// contains a line of the wrong shape yields [`ProtocolError::Format`] with
/// the 1-based line number where parsing stopped.
#[derive(Debug)]
pub struct JudgeReader<R> {
    input: R,
    line: usize,
}

impl<R> JudgeReader<R>
where
    R: BufRead,
{
    #[must_use]
    pub fn new(input: R) -> Self {
        Self { input, line: 0 }
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Reads the pack announcement: `count` packs, each `PACK_SIZE` rows
    /// followed by an end marker line.
    pub fn read_packs(&mut self, count: usize) -> Result<PackSequence, ProtocolError> {
        (0..count).map(|_| self.read_pack()).collect()
    }

    pub fn read_pack(&mut self) -> Result<Pack, ProtocolError> {
        let start = self.line + 1;
        let mut values = [[0; PACK_SIZE]; PACK_SIZE];
        for row in &mut values {
            *row = self.read_row("pack row")?;
        }
        self.skip_end_marker()?;
        Pack::from_values(values).map_err(|e| {
            // Cells are checked in reading order, so the first row holding
            // the rejected value is the offending one.
            let row = values
                .iter()
                .position(|row| row.contains(&e.value))
                .unwrap_or_default();
            self.error_at(start + row, FormatErrorKind::Pack(e))
        })
    }

    /// Reads one turn record: the turn index, then the agent's state and the
    /// opponent's state.
    ///
    /// Returns [`ProtocolError::StreamClosed`] when the input ends exactly
    /// where the turn index would start. Running out of input anywhere later
    /// in the record is a format error.
    pub fn read_turn(&mut self) -> Result<TurnState, ProtocolError> {
        let Some(line) = self.next_line()? else {
            return Err(ProtocolError::StreamClosed);
        };
        let turn: usize = self.parse_value(&line, "turn index")?;
        if turn >= MAX_TURN {
            return Err(self.error(FormatErrorKind::TurnOutOfRange {
                turn,
                max: MAX_TURN,
            }));
        }
        let player = self.read_player()?;
        let opponent = self.read_player()?;
        Ok(TurnState::new(turn, player, opponent))
    }

    /// Reads one player's status lines and board. Pending obstacles are
    /// injected into the returned state's board.
    pub fn read_player(&mut self) -> Result<PlayerState, ProtocolError> {
        let remaining_millis = self.read_value("remaining time")?;
        let obstacle_count = self.read_value("obstacle count")?;
        let skill = self.read_value("skill gauge")?;
        let score = self.read_value("score")?;
        let board = self.read_board()?;
        let context = TurnContext::new(remaining_millis, obstacle_count, skill, score);
        Ok(PlayerState::new(context, board))
    }

    fn read_board(&mut self) -> Result<Board, ProtocolError> {
        let start = self.line + 1;
        let rows = (0..VISIBLE_HEIGHT)
            .map(|_| self.read_row::<BOARD_WIDTH>("board row"))
            .collect::<Result<Vec<_>, _>>()?;
        self.skip_end_marker()?;
        Board::from_visible_rows(&rows).map_err(|e| {
            let line = match &e {
                BoardShapeError::InvalidBlock { row, .. } => start + row,
                _ => start,
            };
            self.error_at(line, FormatErrorKind::Board(e))
        })
    }

    fn read_value<T>(&mut self, what: &'static str) -> Result<T, ProtocolError>
    where
        T: FromStr,
    {
        let line = self.expect_line(what)?;
        self.parse_value(&line, what)
    }

    fn read_row<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], ProtocolError> {
        let line = self.expect_line(what)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != N {
            return Err(self.error(FormatErrorKind::TokenCount {
                what,
                expected: N,
                actual: tokens.len(),
            }));
        }
        let mut row = [0; N];
        for (cell, token) in row.iter_mut().zip(tokens) {
            *cell = self.parse_token(token, what)?;
        }
        Ok(row)
    }

    // The end marker's content is not checked.
    fn skip_end_marker(&mut self) -> Result<(), ProtocolError> {
        self.expect_line("end marker")?;
        Ok(())
    }

    fn parse_value<T>(&self, line: &str, what: &'static str) -> Result<T, ProtocolError>
    where
        T: FromStr,
    {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(token), None) => self.parse_token(token, what),
            _ => Err(self.error(FormatErrorKind::TokenCount {
                what,
                expected: 1,
                actual: line.split_whitespace().count(),
            })),
        }
    }

    fn parse_token<T>(&self, token: &str, what: &'static str) -> Result<T, ProtocolError>
    where
        T: FromStr,
    {
        token.parse().map_err(|_| {
            self.error(FormatErrorKind::InvalidInteger {
                what,
                token: token.to_owned(),
            })
        })
    }

    fn expect_line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.next_line()?
            .ok_or_else(|| self.error_at(self.line + 1, FormatErrorKind::UnexpectedEof { expected }))
    }

    fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let mut line =
            String::from_utf8(bytes).map_err(|_| self.error(FormatErrorKind::InvalidUtf8))?;
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub(crate) fn error(&self, kind: FormatErrorKind) -> ProtocolError {
        self.error_at(self.line, kind)
    }

    fn error_at(&self, line: usize, kind: FormatErrorKind) -> ProtocolError {
        ProtocolFormatError { line, kind }.into()
    }
}
