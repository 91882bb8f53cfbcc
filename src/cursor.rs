/// A byte position into one input string.
///
/// Every recognizer takes the cursor by `&mut` and either advances it past
/// what it recognized or leaves it exactly where it was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Cursor { position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Input from the cursor to end of input.
    pub fn rest<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.position..).unwrap_or("")
    }

    pub fn at_end(&self, input: &str) -> bool {
        self.position >= input.len()
    }

    pub fn starts_with(&self, input: &str, literal: &str) -> bool {
        self.rest(input).starts_with(literal)
    }

    /// Advance by `n` bytes. Callers only pass lengths of matched literals.
    pub fn advance(&mut self, n: usize) {
        self.position += n;
    }

    /// Move forward to `position`. Never moves backwards.
    pub fn seek(&mut self, position: usize) {
        if position > self.position {
            self.position = position;
        }
    }

    /// Consume `literal` if it is next in the input.
    pub fn eat(&mut self, input: &str, literal: &str) -> bool {
        if self.starts_with(input, literal) {
            self.advance(literal.len());
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self, input: &str) {
        let rest = self.rest(input);
        let skipped = rest.len() - rest.trim_start().len();
        self.advance(skipped);
    }

    /// Consume a run of ASCII digits, returning it if non-empty.
    pub fn eat_digits<'a>(&mut self, input: &'a str) -> Option<&'a str> {
        let rest = self.rest(input);
        let len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        self.advance(len);
        Some(&rest[..len])
    }
}
