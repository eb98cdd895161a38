#![deny(warnings)]

/// A backtracking cursor over any iterator.
///
/// Items pulled from the source stay buffered until `extract` or `ignore`
/// drops them, so callers can save `pos()` and rewind with `set_pos` when a
/// speculative match fails.
pub struct Scanner<I: Iterator> where I::Item: Clone {
    src: I,
    buf: Vec<I::Item>,
    // number of buffered items consumed so far
    pos: usize,
}

impl<I> Iterator for Scanner<I> where I: Iterator, I::Item: Clone {
    type Item = I::Item;
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.buf.len() {
            self.buf.push(self.src.next()?);
        }
        self.pos += 1;
        self.curr()
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone {
    pub fn new(source: I) -> Scanner<I> {
        Scanner{src: source, buf: Vec::new(), pos: 0}
    }

    pub fn pos(&self) -> usize { self.pos }

    /// Rewind (or replay) to a previously saved position.
    pub fn set_pos(&mut self, pos: usize) -> bool {
        if pos > self.buf.len() {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Last consumed item, if any since the last `extract`/`ignore`.
    pub fn curr(&self) -> Option<I::Item> {
        self.pos.checked_sub(1).map(|p| self.buf[p].clone())
    }

    pub fn peek(&mut self) -> Option<I::Item> {
        let backtrack = self.pos;
        let peeked = self.next();
        self.pos = backtrack;
        peeked
    }

    /// Drop everything consumed so far.
    pub fn ignore(&mut self) {
        self.buf.drain(..self.pos);
        self.pos = 0;
    }

    /// Take everything consumed so far.
    pub fn extract(&mut self) -> Vec<I::Item> {
        let consumed = self.buf.drain(..self.pos).collect();
        self.pos = 0;
        consumed
    }
}

impl<I> Scanner<I> where I: Iterator, I::Item: Clone + PartialEq {
    pub fn accept(&mut self, what: &I::Item) -> Option<I::Item> {
        self.accept_if(|item| item == what)
    }

    pub fn accept_any(&mut self, any: &[I::Item]) -> Option<I::Item> {
        self.accept_if(|item| any.contains(item))
    }

    /// Advance over the next item only if it satisfies `pred`.
    pub fn accept_if<F>(&mut self, pred: F) -> Option<I::Item>
        where F: Fn(&I::Item) -> bool
    {
        let backtrack = self.pos;
        match self.next() {
            Some(next) if pred(&next) => Some(next),
            _ => {
                self.pos = backtrack;
                None
            }
        }
    }

    /// Skip over items satisfying `pred`. Returns if the scanner advanced.
    pub fn skip_all<F>(&mut self, pred: F) -> bool
        where F: Fn(&I::Item) -> bool
    {
        let mut advanced = false;
        while self.accept_if(&pred).is_some() { advanced = true; }
        advanced
    }
}

impl<I: Iterator<Item=char>> Scanner<I> {
    pub fn extract_string(&mut self) -> String {
        self.extract().into_iter().collect()
    }

    /// Skip blanks (but not new-lines) and forget about them.
    pub fn ignore_blanks(&mut self) {
        self.skip_all(|c| c.is_whitespace() && *c != '\n');
        self.ignore();
    }

    /// Scan a string delimited by `q`. The quotes are not part of the result.
    /// Backslash escapes the next char.
    pub fn scan_quoted(&mut self, q: char) -> Option<String> {
        let backtrack = self.pos;
        self.accept(&q)?;
        let mut content = String::new();
        while let Some(n) = self.next() {
            if n == q {
                self.ignore();
                return Some(content);
            }
            if n == '\\' {
                match self.next() {
                    Some(escaped) => content.push(escaped),
                    None => break,
                }
            } else {
                content.push(n);
            }
        }
        self.pos = backtrack;
        None
    }
}

///////////////////////////////////////////////////////////////////////////////
