use alloc::vec::Vec;

/// Deepest accepted nesting of generic arguments.
const MAX_DEPTH: usize = 64;

/// One raw token with its generic arguments, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TokenTree<'a> {
    pub raw: &'a str,
    pub args: Vec<TokenTree<'a>>,
}

/// Parses `raw<arg,arg<nested>>`, whitespace around names is ignored.
pub(crate) fn parse(input: &str) -> Result<TokenTree<'_>, &'static str> {
    let mut parser = Parser { input, pos: 0 };
    let tree = parser.node(0)?;
    if parser.pos != input.len() {
        return Err("unexpected characters after the type");
    }
    Ok(tree)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn node(&mut self, depth: usize) -> Result<TokenTree<'a>, &'static str> {
        if depth > MAX_DEPTH {
            return Err("generic arguments nested too deeply");
        }

        let start = self.pos;
        while let Some(byte) = self.peek() {
            if matches!(byte, b'<' | b',' | b'>') {
                break;
            }
            self.pos += 1;
        }
        let raw = self.input[start..self.pos].trim();
        if raw.is_empty() {
            return Err("empty type name");
        }

        let mut args = Vec::new();
        if self.peek() == Some(b'<') {
            self.pos += 1;
            loop {
                args.push(self.node(depth + 1)?);
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b'>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err("unclosed generic arguments"),
                }
            }
        }
        Ok(TokenTree { raw, args })
    }
}
