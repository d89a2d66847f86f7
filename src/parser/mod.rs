mod precedence;

use crate::ast::{self, Expression, Operator, Statement};
use crate::token::{Position, Token, TokenSource, TokenType};
use custom_error::custom_error;
pub use precedence::Precedence;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub ParseError

    UnexpectedToken{want: TokenType, got: TokenType, position: Position} = "expected next token to be {want}, got {got} instead ({position})",
    NoPrefixRule{token_type: TokenType, position: Position} = "no prefix parse rule for {token_type} found ({position})",
    InvalidInteger{literal: String, position: Position} = "could not parse {literal} as integer ({position})",
}

type PrefixParseFn<S> = fn(&mut Parser<S>) -> Option<Expression>;
type InfixParseFn<S> = fn(&mut Parser<S>, Expression) -> Option<Expression>;

/// A Pratt parser over a forward-only token source.
///
/// Syntax errors are collected rather than returned early; a failed
/// statement is dropped and parsing resumes at the next statement.
pub struct Parser<S> {
    tokens: S,
    cur_token: Token,
    cur_position: Position,
    peek_token: Token,
    peek_position: Position,
    // `{` tokens passed over and not yet closed
    brace_depth: usize,
    errors: Vec<ParseError>,
}

/// Parses a whole token stream, rendering any diagnostics as text.
pub fn parse<S: TokenSource>(tokens: S) -> (ast::Program, Vec<String>) {
    let (program, errors) = Parser::new(tokens).parse();
    (program, errors.iter().map(ParseError::to_string).collect())
}

impl<S: TokenSource> Parser<S> {
    pub fn new(mut tokens: S) -> Self {
        let cur_token = tokens.next_token();
        let cur_position = tokens.position();
        let peek_token = tokens.next_token();
        let peek_position = tokens.position();

        let mut parser = Self {
            tokens,
            cur_token,
            cur_position,
            peek_token,
            peek_position,
            brace_depth: 0,
            errors: vec![],
        };
        parser.track_braces();
        parser
    }

    fn next_token(&mut self) {
        self.cur_token = std::mem::replace(&mut self.peek_token, self.tokens.next_token());
        self.cur_position = self.peek_position;
        self.peek_position = self.tokens.position();
        self.track_braces();
    }

    fn track_braces(&mut self) {
        match self.cur_token.token_type() {
            TokenType::LBrace => self.brace_depth += 1,
            TokenType::RBrace => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Whether the current token closes a block opened at `depth`.
    fn closes_block(&self, depth: usize) -> bool {
        self.cur_token.is(TokenType::RBrace) && self.brace_depth < depth
    }

    pub fn parse(mut self) -> (ast::Program, Vec<ParseError>) {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        tracing::trace!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        (program, self.errors)
    }

    pub fn parse_program(self) -> Result<ast::Program, Vec<ParseError>> {
        let (program, errors) = self.parse();

        if errors.is_empty() {
            Ok(program)
        } else {
            Err(errors)
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type() {
            TokenType::Let => self.parse_let_statement().map(Statement::Let),
            TokenType::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        let token = self.cur_token.clone();
        let depth = self.brace_depth;

        if !self.expect_peek(TokenType::Ident) {
            self.synchronize(depth);
            return None;
        }

        let name: ast::Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Assign) {
            self.synchronize(depth);
            return None;
        }

        self.next_token();

        let value = match self.parse_expression(Precedence::Lowest) {
            Some(value) => value,
            None => {
                self.synchronize(depth);
                return None;
            }
        };

        self.skip_semicolon();

        Some(ast::LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        let token = self.cur_token.clone();
        let depth = self.brace_depth;

        if self.peek_token.is(TokenType::Semicolon)
            || self.peek_token.is(TokenType::RBrace)
            || self.peek_token.is(TokenType::Eof)
        {
            self.skip_semicolon();
            return Some(ast::ReturnStatement {
                token,
                return_value: None,
            });
        }

        self.next_token();

        let return_value = match self.parse_expression(Precedence::Lowest) {
            Some(value) => value,
            None => {
                self.synchronize(depth);
                return None;
            }
        };

        self.skip_semicolon();

        Some(ast::ReturnStatement {
            token,
            return_value: Some(return_value),
        })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_semicolon();

        Some(ast::ExpressionStatement { token, expression })
    }

    fn parse_block_statement(&mut self) -> ast::BlockStatement {
        let token = self.cur_token.clone();
        let depth = self.brace_depth;
        let mut statements = vec![];

        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            // a broken statement may already sit on this block's `}`
            if self.closes_block(depth) {
                break;
            }
            self.next_token();
        }

        if self.cur_token.is(TokenType::Eof) {
            self.push_error(ParseError::UnexpectedToken {
                want: TokenType::RBrace,
                got: TokenType::Eof,
                position: self.cur_position,
            });
        }

        ast::BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match Self::prefix_rule(self.cur_token.token_type()) {
            Some(rule) => rule,
            None => {
                self.push_error(ParseError::NoPrefixRule {
                    token_type: self.cur_token.token_type(),
                    position: self.cur_position,
                });
                return None;
            }
        };

        let mut left = prefix(self)?;

        while !self.peek_token.is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match Self::infix_rule(self.peek_token.token_type()) {
                Some(rule) => rule,
                None => return Some(left),
            };

            self.next_token();

            left = infix(self, left)?;
        }

        Some(left)
    }

    fn prefix_rule(token_type: TokenType) -> Option<PrefixParseFn<S>> {
        let rule: PrefixParseFn<S> = match token_type {
            TokenType::Ident => Self::parse_identifier,
            TokenType::Int => Self::parse_integer_literal,
            TokenType::String => Self::parse_string_literal,
            TokenType::True | TokenType::False => Self::parse_boolean,
            TokenType::Bang | TokenType::Minus | TokenType::Plus => Self::parse_prefix_expression,
            TokenType::LParen => Self::parse_grouped_expression,
            TokenType::If => Self::parse_if_expression,
            TokenType::Function => Self::parse_function_literal,
            TokenType::LBracket => Self::parse_array_literal,
            TokenType::LBrace => Self::parse_hash_literal,
            _ => return None,
        };
        Some(rule)
    }

    fn infix_rule(token_type: TokenType) -> Option<InfixParseFn<S>> {
        let rule: InfixParseFn<S> = match token_type {
            TokenType::Plus
            | TokenType::Minus
            | TokenType::Slash
            | TokenType::Asterisk
            | TokenType::Eq
            | TokenType::NotEq
            | TokenType::LT
            | TokenType::GT
            | TokenType::And
            | TokenType::Or => Self::parse_infix_expression,
            TokenType::LParen => Self::parse_call_expression,
            TokenType::LBracket => Self::parse_index_expression,
            _ => return None,
        };
        Some(rule)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        match token.literal().parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(ast::IntegerLiteral { token, value })),
            Err(_) => {
                self.push_error(ParseError::InvalidInteger {
                    literal: token.literal().to_owned(),
                    position: self.cur_position,
                });
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal().to_owned();

        Some(Expression::String(ast::StringLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(ast::BooleanLiteral {
            token: self.cur_token.clone(),
            value: self.cur_token.is(TokenType::True),
        }))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from_token(&token)?;

        self.next_token();

        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = Operator::from_token(&token)?;
        let precedence = self.cur_precedence();

        self.next_token();

        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) || !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function(ast::FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenType::RParen)?;

        Some(Expression::Call(ast::CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenType::RBracket)?;

        Some(Expression::Array(ast::ArrayLiteral { token, elements }))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = vec![];

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(Expression::Index(ast::IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let mut pairs = vec![];

        while !self.peek_token.is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_token.is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }

        Some(Expression::Hash(ast::HashLiteral { token, pairs }))
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }
    }

    /// Skips the rest of a broken statement begun at brace depth `depth`,
    /// stopping on its `;`, just before a closing brace or the end of input,
    /// or on the `}` of the enclosing block.
    fn synchronize(&mut self, depth: usize) {
        while !self.cur_token.is(TokenType::Semicolon)
            && !self.peek_token.is(TokenType::RBrace)
            && !self.peek_token.is(TokenType::Eof)
            && !self.closes_block(depth)
        {
            self.next_token();
        }
    }

    fn peek_precedence(&self) -> Precedence {
        self.peek_token.token_type().into()
    }

    fn cur_precedence(&self) -> Precedence {
        self.cur_token.token_type().into()
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.push_error(ParseError::UnexpectedToken {
            want: expected,
            got: self.peek_token.token_type(),
            position: self.peek_position,
        });
    }

    fn push_error(&mut self, error: ParseError) {
        tracing::debug!(%error, "syntax error");
        self.errors.push(error);
    }
}
