//! Response files.
//!
//! An argument of the form `@path` is replaced by the arguments stored in
//! the file at `path`. Each line is split on whitespace; text enclosed in
//! `"` or `'` is kept together, and a quote left open runs to the end of its
//! line. Quoted and unquoted text touching each other form one argument, so
//! `--name="Ada Lovelace"` is a single argument.
//!
//! Response files are not expanded recursively.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use winnow::{
    ModalResult, Parser as _,
    combinator::{alt, delimited, opt, preceded, repeat, terminated},
    token::take_while,
};

/// Source of response file contents.
pub trait ResponseFileReader {
    /// Read the file at `path` as a list of lines.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

impl<F> ResponseFileReader for F
where
    F: Fn(&Path) -> io::Result<Vec<String>>,
{
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        self(path)
    }
}

/// Reads response files from the file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsResponseFiles;

impl ResponseFileReader for FsResponseFiles {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let file = File::open(path)?;
        BufReader::new(file).lines().collect()
    }
}

/// Read the file at `path` and split it into arguments.
pub fn expand(reader: &dyn ResponseFileReader, path: &Path) -> io::Result<Vec<String>> {
    let lines = reader.read_lines(path)?;
    Ok(lines.iter().flat_map(|line| tokenize_line(line)).collect())
}

/// Split one line into arguments.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut input = line;
    line_tokens.parse_next(&mut input).unwrap_or_default()
}

fn line_tokens(input: &mut &str) -> ModalResult<Vec<String>> {
    preceded(whitespace, repeat(0.., terminated(token, whitespace))).parse_next(input)
}

fn token(input: &mut &str) -> ModalResult<String> {
    repeat(1.., alt((double_quoted, single_quoted, bare)))
        .fold(String::new, |mut acc, segment: &str| {
            acc.push_str(segment);
            acc
        })
        .parse_next(input)
}

fn double_quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('"', take_while(0.., |c: char| c != '"'), opt('"')).parse_next(input)
}

fn single_quoted<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    delimited('\'', take_while(0.., |c: char| c != '\''), opt('\'')).parse_next(input)
}

fn bare<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '"' && c != '\'').parse_next(input)
}

fn whitespace<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}
