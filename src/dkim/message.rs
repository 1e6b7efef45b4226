//! Splits a raw message into its header fields and body without copying
// https://tools.ietf.org/html/rfc5322#section-2.2

use std::str;

use super::error::{self, Error};

pub(super) const CRLF: &[u8] = b"\r\n";
pub(super) const LF: &[u8] = b"\n";

/// A header field as it appears in the message
#[derive(Debug, PartialEq, Eq)]
pub(super) struct RawHeader<'a> {
    /// Field name, without the colon
    pub(super) name: &'a str,
    /// Whole field, folding included, without the final line ending
    pub(super) raw: &'a [u8],
    /// Everything after the colon
    pub(super) value: &'a [u8],
}

#[derive(Debug)]
pub(super) struct RawMessage<'a> {
    pub(super) headers: Vec<RawHeader<'a>>,
    pub(super) body: &'a [u8],
    /// Line ending of the first line, `\r\n` when there is none
    pub(super) line_ending: &'static [u8],
}

struct Span {
    start: usize,
    colon: usize,
    end: usize,
}

impl<'a> RawMessage<'a> {
    pub(super) fn parse(message: &'a [u8]) -> Result<Self, Error> {
        let mut spans: Vec<Span> = Vec::new();
        let mut line_ending = CRLF;
        let mut body: &'a [u8] = &[];
        let mut pos = 0;

        while pos < message.len() {
            let (line_end, next) = match message[pos..].iter().position(|b| *b == b'\n') {
                Some(i) => {
                    let lf = pos + i;
                    if lf > pos && message[lf - 1] == b'\r' {
                        (lf - 1, lf + 1)
                    } else {
                        (lf, lf + 1)
                    }
                }
                None => (message.len(), message.len()),
            };

            if pos == 0 && line_end < next && message[line_end] == b'\n' {
                line_ending = LF;
            }

            let line = &message[pos..line_end];
            if line.is_empty() {
                body = &message[next..];
                break;
            }

            if line[0] == b' ' || line[0] == b'\t' {
                let span = spans
                    .last_mut()
                    .ok_or_else(|| error::message("continuation line before the first header"))?;
                span.end = line_end;
            } else {
                let colon = line
                    .iter()
                    .position(|b| *b == b':')
                    .ok_or_else(|| error::message("header line without a colon"))?;
                spans.push(Span {
                    start: pos,
                    colon: pos + colon,
                    end: line_end,
                });
            }

            pos = next;
        }

        let headers = spans
            .into_iter()
            .map(|span| {
                let name = str::from_utf8(&message[span.start..span.colon])
                    .map_err(error::message)?
                    .trim_end();
                if name.is_empty() {
                    return Err(error::message("empty header name"));
                }

                Ok(RawHeader {
                    name,
                    raw: &message[span.start..span.end],
                    value: &message[span.colon + 1..span.end],
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(RawMessage {
            headers,
            body,
            line_ending,
        })
    }
}
