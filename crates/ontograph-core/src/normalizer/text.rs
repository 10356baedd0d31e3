//! The normal-form text interchange format.
//!
//! One axiom per line, `<left> SubClassOf <right>`, each side in the
//! Manchester-style rendering of [`ClassExpression`]'s `Display`:
//!
//! ```text
//! Father SubClassOf Parent
//! Father and Mother SubClassOf Nothing
//! hasChild some Person SubClassOf Parent
//! Parent SubClassOf hasChild some Person
//! ```
//!
//! Names that are not plain words are bracketed (`<Father Figure>`), so
//! every rendered axiom reads back to the same tree.
//!
//! Reading a file classifies every line with the same rules as
//! [`Normalizer::normalize`], so the same lines in the same order grow the
//! symbol tables identically.

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::expression::{
    ClassExpression, ExpressionError, Subsumption, KEYWORDS, NAME_CLOSE, NAME_ESCAPE, NAME_OPEN,
};
use crate::ontology::OntologyStore;

use super::{Normalization, NormalFormError, Normalizer};

const SUBCLASS_OF: &str = "SubClassOf";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    /// A bare word: a name or a keyword.
    Word(&'a str),
    /// A bracketed name, unescaped. Never a keyword.
    Name(String),
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Token::Open => "(".to_string(),
            Token::Close => ")".to_string(),
            Token::Word(word) => (*word).to_string(),
            Token::Name(name) => format!("<{}>", name),
        }
    }
}

/// Read a bracketed name starting after its `<`. Returns the name and the
/// byte offset just past the closing `>`.
fn bracketed(input: &str, from: usize) -> Result<(String, usize), ExpressionError> {
    let mut name = String::new();
    let mut chars = input[from..].char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            NAME_CLOSE => return Ok((name, from + i + c.len_utf8())),
            NAME_ESCAPE => match chars.next() {
                Some((_, 'n')) => name.push('\n'),
                Some((_, 'r')) => name.push('\r'),
                Some((_, escaped)) => name.push(escaped),
                None => break,
            },
            c => name.push(c),
        }
    }
    Err(ExpressionError::malformed("unterminated <name>"))
}

/// Split text into tokens: parentheses, `<...>` names, and
/// whitespace-separated words.
fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = input[pos..].chars().next() {
        let next = pos + c.len_utf8();
        match c {
            c if c.is_whitespace() => pos = next,
            '(' => {
                tokens.push(Token::Open);
                pos = next;
            }
            ')' => {
                tokens.push(Token::Close);
                pos = next;
            }
            NAME_OPEN => {
                let (name, end) = bracketed(input, next)?;
                tokens.push(Token::Name(name));
                pos = end;
            }
            NAME_CLOSE => return Err(ExpressionError::malformed("unexpected '>'")),
            _ => {
                let len = input[pos..]
                    .find(|c: char| {
                        c.is_whitespace() || matches!(c, '(' | ')' | NAME_OPEN | NAME_CLOSE)
                    })
                    .unwrap_or(input.len() - pos);
                tokens.push(Token::Word(&input[pos..pos + len]));
                pos += len;
            }
        }
    }
    Ok(tokens)
}

/// Recursive-descent reader for one side.
///
/// ```text
/// expr := term ("and" term)*      left associative
/// term := "(" expr ")" | NAME "some" term | NAME
/// ```
struct ExprReader<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> ExprReader<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(word)) if *word == keyword)
    }

    fn read_all(mut self) -> Result<ClassExpression, ExpressionError> {
        let expr = self.expr()?;
        match self.next() {
            None => Ok(expr),
            Some(extra) => Err(ExpressionError::malformed(format!(
                "unexpected '{}' after expression",
                extra.describe()
            ))),
        }
    }

    fn expr(&mut self) -> Result<ClassExpression, ExpressionError> {
        let mut left = self.term()?;
        while self.at_keyword("and") {
            self.pos += 1;
            let right = self.term()?;
            left = ClassExpression::conjunction(left, right);
        }
        Ok(left)
    }

    fn name(&mut self, name: &str) -> Result<ClassExpression, ExpressionError> {
        if self.at_keyword("some") {
            self.pos += 1;
            let filler = self.term()?;
            ClassExpression::existential(name, filler)
        } else {
            Ok(ClassExpression::atomic(name))
        }
    }

    fn term(&mut self) -> Result<ClassExpression, ExpressionError> {
        match self.next() {
            None => Err(ExpressionError::malformed("expected a class expression")),
            Some(Token::Open) => {
                let inner = self.expr()?;
                match self.next() {
                    Some(Token::Close) => Ok(inner),
                    _ => Err(ExpressionError::malformed("unbalanced parenthesis")),
                }
            }
            Some(Token::Close) => Err(ExpressionError::malformed("unexpected ')'")),
            Some(Token::Word(word)) if KEYWORDS.contains(word) => Err(
                ExpressionError::malformed(format!("unexpected '{}'", word)),
            ),
            Some(Token::Word(word)) => self.name(word),
            Some(Token::Name(name)) => self.name(name),
        }
    }
}

impl FromStr for ClassExpression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        ExprReader::new(&tokens).read_all()
    }
}

/// Read one line.
///
/// `None` for blank lines and lines without `SubClassOf`; otherwise the
/// parsed axiom or the reason it could not be read. The first bare
/// `SubClassOf` separates the sides; a bracketed `<SubClassOf>` is a name.
pub fn parse_line(line: &str) -> Option<Result<Subsumption, ExpressionError>> {
    let line = line.trim();
    if line.is_empty() || !line.contains(SUBCLASS_OF) {
        return None;
    }

    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(err) => return Some(Err(err)),
    };
    let Some(split) = tokens
        .iter()
        .position(|t| matches!(t, Token::Word(word) if *word == SUBCLASS_OF))
    else {
        return Some(Err(ExpressionError::malformed("no SubClassOf between the sides")));
    };

    let (left, right) = (&tokens[..split], &tokens[split + 1..]);
    Some(
        ExprReader::new(left).read_all().and_then(|sub| {
            Ok(Subsumption::new(sub, ExprReader::new(right).read_all()?))
        }),
    )
}

/// Classify every line of `reader` into `normalizer`'s session.
///
/// Issue indices are 1-based line numbers.
pub fn read_normal_forms<R: BufRead>(
    reader: R,
    normalizer: &mut Normalizer,
    source: &Path,
) -> Result<Normalization, NormalFormError> {
    let mut out = Normalization::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| NormalFormError::io(source, e))?;
        let line_no = i + 1;

        match parse_line(&line) {
            None => continue,
            Some(Ok(axiom)) => normalizer.absorb(&mut out, line_no, &axiom),
            Some(Err(err)) => normalizer.reject(&mut out, line_no, line.trim().to_string(), &err),
        }
    }

    normalizer.finish(&out);
    Ok(out)
}

/// Read a normal-form file.
pub fn load_normal_forms(
    path: impl AsRef<Path>,
    normalizer: &mut Normalizer,
) -> Result<Normalization, NormalFormError> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| NormalFormError::io(path, e))?;
    read_normal_forms(BufReader::new(file), normalizer, path)
}

/// Write one line per subsumption. Returns the number of lines written.
pub fn write_normal_forms<'a, W, I>(mut writer: W, axioms: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Subsumption>,
{
    let mut count = 0;
    for axiom in axioms {
        writeln!(writer, "{}", axiom)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write every subsumption of a store to `path`.
pub fn save_normal_forms(
    path: impl AsRef<Path>,
    store: &dyn OntologyStore,
) -> Result<usize, NormalFormError> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|e| NormalFormError::io(path, e))?;
    write_normal_forms(BufWriter::new(file), store.subsumptions())
        .map_err(|e| NormalFormError::io(path, e))
}
