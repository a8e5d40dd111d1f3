//! The shunting-yard engine
//!
//!     Converts a token sequence in infix notation into postfix order. Next to the classic
//!     algorithm the engine handles unary operators on both sides of their operand and
//!     several delimiter pairs at once.
//!
//! Arity from context
//!
//!     A symbol can be declared as prefix and as binary operator (`-`). Which one is meant
//!     depends on what came before it. At the start of the input, after an opening
//!     delimiter, after a prefix operator and after a binary operator an operand is still
//!     missing, so only a value, an opening delimiter or a prefix operator can follow.
//!     After a value, a closing delimiter or a postfix operator the operand is complete and
//!     a binary operator, a postfix operator or a closing delimiter follows.
//!
//! Delimiters
//!
//!     An opening delimiter pushes a sentinel that remembers which closing delimiter it is
//!     waiting for. A closing delimiter flushes operators down to the nearest sentinel and
//!     has to be the one that sentinel awaits, so pairs nest without crossing.
//!
//!     Delimiters never reach the output. After the input is consumed every non-delimiter
//!     token has to be in the output exactly once.

use tracing::{debug, trace};

use super::error::ShuntError;
use super::operator::OperatorSet;
use super::rpn::{pop_before, RpnToken};
use super::token::{DelimiterPair, Token};
use super::tokenizer::Tokenizer;

/// What the previously processed token was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Start,
    OpeningDelimiter,
    ClosingDelimiter,
    Operand,
    Prefix,
    Postfix,
    Binary,
}

impl Previous {
    /// An operand is still missing: a value, an opening delimiter or a prefix operator comes next.
    fn expects_operand(self) -> bool {
        matches!(
            self,
            Previous::Start | Previous::OpeningDelimiter | Previous::Prefix | Previous::Binary
        )
    }
}

#[derive(Debug)]
enum StackEntry<'a> {
    Operator(RpnToken),
    Sentinel {
        opening: &'a Token,
        awaiting: &'a Token,
    },
}

struct ShuntingYard<'a> {
    input: &'a str,
    operators: &'a OperatorSet,
    delimiters: &'a [DelimiterPair],
    output: Vec<RpnToken>,
    stack: Vec<StackEntry<'a>>,
    previous: Previous,
}

impl<'a> ShuntingYard<'a> {
    fn new(input: &'a str, operators: &'a OperatorSet, delimiters: &'a [DelimiterPair]) -> Self {
        ShuntingYard {
            input,
            operators,
            delimiters,
            output: Vec::new(),
            stack: Vec::new(),
            previous: Previous::Start,
        }
    }

    fn opening(&self, token: &Token) -> Option<&'a DelimiterPair> {
        self.delimiters
            .iter()
            .find(|pair| pair.opening.token() == token)
    }

    fn is_closing(&self, token: &Token) -> bool {
        self.delimiters
            .iter()
            .any(|pair| pair.closing.token() == token)
    }

    fn is_delimiter(&self, token: &Token) -> bool {
        self.opening(token).is_some() || self.is_closing(token)
    }

    fn run(mut self, tokens: &[Token]) -> Result<Vec<RpnToken>, ShuntError> {
        for (position, token) in tokens.iter().enumerate() {
            trace!(position, token = token.as_str(), previous = ?self.previous, "shunting");
            if let Some(pair) = self.opening(token) {
                self.open(pair, token, position)?;
            } else if self.is_closing(token) {
                self.close(token, position)?;
            } else if self.operators.contains(token.as_str()) {
                self.operator(token, position)?;
            } else {
                self.operand(token, position)?;
            }
        }
        self.finish(tokens)
    }

    fn open(
        &mut self,
        pair: &'a DelimiterPair,
        token: &Token,
        position: usize,
    ) -> Result<(), ShuntError> {
        if !self.previous.expects_operand() {
            return Err(ShuntError::BinaryOrUnaryPostfixOperatorExpected {
                input: self.input.to_string(),
                symbol: token.clone(),
                position,
            });
        }
        self.stack.push(StackEntry::Sentinel {
            opening: pair.opening.token(),
            awaiting: pair.closing.token(),
        });
        self.previous = Previous::OpeningDelimiter;
        Ok(())
    }

    fn close(&mut self, token: &Token, position: usize) -> Result<(), ShuntError> {
        if self.output.is_empty() {
            return Err(ShuntError::StartsWithClosingDelimiter {
                input: self.input.to_string(),
                delimiter: token.clone(),
            });
        }
        if self.previous.expects_operand() {
            return Err(ShuntError::UnaryPrefixOperatorExpected {
                input: self.input.to_string(),
                symbol: token.clone(),
                position,
            });
        }
        loop {
            match self.stack.pop() {
                Some(StackEntry::Operator(op)) => {
                    trace!(operator = %op, "popped to output");
                    self.output.push(op);
                }
                Some(StackEntry::Sentinel { opening, awaiting }) => {
                    if awaiting != token {
                        return Err(ShuntError::NonMatchingDelimiters {
                            input: self.input.to_string(),
                            opening: Some(opening.clone()),
                            closing: token.clone(),
                        });
                    }
                    break;
                }
                None => {
                    return Err(ShuntError::NonMatchingDelimiters {
                        input: self.input.to_string(),
                        opening: None,
                        closing: token.clone(),
                    });
                }
            }
        }
        self.previous = Previous::ClosingDelimiter;
        Ok(())
    }

    fn operator(&mut self, token: &Token, position: usize) -> Result<(), ShuntError> {
        let operators = self.operators;
        let (incoming, previous) = if self.previous.expects_operand() {
            match operators.prefix(token.as_str()) {
                Some(op) => (RpnToken::from(op), Previous::Prefix),
                None if self.output.is_empty() => {
                    return Err(ShuntError::StartsWithNonPrefixUnaryOperator {
                        input: self.input.to_string(),
                        symbol: token.clone(),
                    })
                }
                None => {
                    return Err(ShuntError::UnaryPrefixOperatorExpected {
                        input: self.input.to_string(),
                        symbol: token.clone(),
                        position,
                    })
                }
            }
        } else {
            match operators.postfix_or_binary(token.as_str()) {
                Some(op) => {
                    let incoming = RpnToken::from(op);
                    let previous = if incoming.is_postfix() {
                        Previous::Postfix
                    } else {
                        Previous::Binary
                    };
                    (incoming, previous)
                }
                None => {
                    return Err(ShuntError::BinaryOrUnaryPostfixOperatorExpected {
                        input: self.input.to_string(),
                        symbol: token.clone(),
                        position,
                    })
                }
            }
        };
        debug!(symbol = token.as_str(), role = ?previous, position, "operator arity decided");

        loop {
            let pop = matches!(
                self.stack.last(),
                Some(StackEntry::Operator(top)) if pop_before(top, &incoming)
            );
            if !pop {
                break;
            }
            if let Some(StackEntry::Operator(top)) = self.stack.pop() {
                trace!(operator = %top, incoming = %incoming, "popped to output");
                self.output.push(top);
            }
        }
        self.stack.push(StackEntry::Operator(incoming));
        self.previous = previous;
        Ok(())
    }

    fn operand(&mut self, token: &Token, position: usize) -> Result<(), ShuntError> {
        if !self.previous.expects_operand() {
            return Err(ShuntError::BinaryOrUnaryPostfixOperatorExpected {
                input: self.input.to_string(),
                symbol: token.clone(),
                position,
            });
        }
        self.output.push(RpnToken::value(token.clone()));
        self.previous = Previous::Operand;
        Ok(())
    }

    fn finish(mut self, tokens: &[Token]) -> Result<Vec<RpnToken>, ShuntError> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                StackEntry::Operator(op) => self.output.push(op),
                StackEntry::Sentinel { opening, .. } => {
                    return Err(ShuntError::UnusedTokens {
                        input: self.input.to_string(),
                        delimiter: opening.clone(),
                    });
                }
            }
        }

        let expected = tokens.iter().filter(|t| !self.is_delimiter(t)).count();
        if self.output.len() != expected {
            return Err(ShuntError::LengthMismatch {
                input: self.input.to_string(),
                expected,
                actual: self.output.len(),
            });
        }
        debug!(
            input = self.input,
            output = %join(&self.output),
            "converted to postfix"
        );
        Ok(self.output)
    }
}

fn join(tokens: &[RpnToken]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the engine over `tokens`; `input` is only used in error messages.
pub(crate) fn shunt_tokenized(
    input: &str,
    tokens: &[Token],
    operators: &OperatorSet,
    delimiters: &[DelimiterPair],
) -> Result<Vec<RpnToken>, ShuntError> {
    ShuntingYard::new(input, operators, delimiters).run(tokens)
}

/// Convert an already tokenized expression into postfix order.
pub fn shunt_tokens(
    tokens: &[Token],
    operators: &OperatorSet,
    delimiters: &[DelimiterPair],
) -> Result<Vec<RpnToken>, ShuntError> {
    let input: String = tokens.iter().map(Token::as_str).collect();
    shunt_tokenized(&input, tokens, operators, delimiters)
}

/// Tokenize `input` against the operator and delimiter symbols, then convert it into
/// postfix order.
pub fn shunt(
    input: &str,
    operators: &OperatorSet,
    delimiters: &[DelimiterPair],
) -> Result<Vec<RpnToken>, ShuntError> {
    let symbols = operators
        .symbols()
        .map(Token::as_str)
        .chain(delimiters.iter().flat_map(|pair| {
            [pair.opening.token().as_str(), pair.closing.token().as_str()]
        }));
    let tokens = Tokenizer::new(symbols).tokenize(input);
    shunt_tokenized(input, &tokens, operators, delimiters)
}
