use crate::token::{Position, Token, TokenSource};

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
    column: usize,
    token_start: Position,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }

    fn position(&self) -> Position {
        self.token_start
    }
}

impl Lexer {
    pub fn new(input: String) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
            column: 0,
            token_start: Position::default(),
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        if self.ch == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
        self.column += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    /// Consumes the current character and, when the next one is `second`,
    /// that one too.
    fn two_char_token(&mut self, second: u8, double: Token, single: Token) -> Token {
        if self.peek_char() == second {
            self.read_char();
            double
        } else {
            single
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.token_start = Position {
            line: self.line,
            column: self.column,
        };

        let token = match self.ch {
            b'=' => self.two_char_token(b'=', Token::Eq, Token::Assign),
            b'!' => self.two_char_token(b'=', Token::NotEq, Token::Bang),
            b'&' => self.two_char_token(b'&', Token::And, Token::Illegal("&".to_owned())),
            b'|' => self.two_char_token(b'|', Token::Or, Token::Illegal("|".to_owned())),
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Asterisk,
            b'/' => Token::Slash,
            b'<' => Token::LT,
            b'>' => Token::GT,
            b';' => Token::Semicolon,
            b':' => Token::Colon,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b',' => Token::Comma,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b'"' => Token::String(self.read_string()),
            0 => Token::Eof,
            c => {
                if is_letter(c) {
                    return self.read_identifier().into();
                } else if c.is_ascii_digit() {
                    return Token::Int(self.read_number().to_owned());
                } else {
                    Token::Illegal(self.read_illegal())
                }
            }
        };
        self.read_char();
        token
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self) -> &str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    // Leaves the closing quote as the current character.
    fn read_string(&mut self) -> String {
        let start = self.position + 1;
        loop {
            self.read_char();
            if self.ch == b'"' || self.ch == 0 {
                break;
            }
        }
        self.input[start..self.position].to_owned()
    }

    // Keeps multi-byte characters whole so the literal stays valid UTF-8.
    fn read_illegal(&mut self) -> String {
        let start = self.position;
        while self.peek_char() & 0b1100_0000 == 0b1000_0000 {
            self.read_char();
        }
        self.input[start..self.read_position].to_owned()
    }

    fn skip_whitespace(&mut self) {
        while self.ch.is_ascii_whitespace() {
            self.read_char();
        }
    }
}
