//! Header and body canonicalization
// https://tools.ietf.org/html/rfc6376#section-3.4

use super::{
    message::{RawHeader, CRLF},
    DkimCanonicalizationType,
};

fn is_wsp(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Splits on LF, dropping a CR right before it
fn lines(input: &[u8]) -> Vec<&[u8]> {
    input
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}

/// Replaces every run of spaces and tabs by a single space
fn collapse_wsp(input: &[u8], out: &mut Vec<u8>) {
    let mut in_wsp = false;
    for &b in input {
        if is_wsp(b) {
            if !in_wsp {
                out.push(b' ');
            }
            in_wsp = true;
        } else {
            out.push(b);
            in_wsp = false;
        }
    }
}

fn trim_wsp(mut input: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = input {
        if !is_wsp(*first) {
            break;
        }
        input = rest;
    }
    while let [rest @ .., last] = input {
        if !is_wsp(*last) {
            break;
        }
        input = rest;
    }
    input
}

/// Canonicalizes the body of a message
pub(super) fn body(body: &[u8], canonicalization: DkimCanonicalizationType) -> Vec<u8> {
    let mut lines = lines(body);
    if canonicalization == DkimCanonicalizationType::Relaxed {
        // only whitespace left on a line makes it empty, so do this before
        // dropping trailing empty lines
        let mut relaxed = Vec::with_capacity(lines.len());
        for line in &lines {
            let mut out = Vec::with_capacity(line.len());
            collapse_wsp(line, &mut out);
            while out.last() == Some(&b' ') {
                out.pop();
            }
            relaxed.push(out);
        }

        while relaxed.last().is_some_and(Vec::is_empty) {
            relaxed.pop();
        }

        let mut out = Vec::with_capacity(body.len());
        for line in relaxed {
            out.extend_from_slice(&line);
            out.extend_from_slice(CRLF);
        }
        return out;
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return CRLF.to_vec();
    }

    let mut out = Vec::with_capacity(body.len() + 2);
    for line in lines {
        out.extend_from_slice(line);
        out.extend_from_slice(CRLF);
    }
    out
}

/// Canonicalizes one header field, CRLF terminated
pub(super) fn header(
    header: &RawHeader<'_>,
    canonicalization: DkimCanonicalizationType,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(header.raw.len() + 2);
    match canonicalization {
        DkimCanonicalizationType::Simple => {
            let mut lines = lines(header.raw).into_iter();
            if let Some(first) = lines.next() {
                out.extend_from_slice(first);
            }
            for line in lines {
                out.extend_from_slice(CRLF);
                out.extend_from_slice(line);
            }
        }
        DkimCanonicalizationType::Relaxed => {
            out.extend(header.name.trim_end().bytes().map(|b| b.to_ascii_lowercase()));
            out.push(b':');

            let unfolded: Vec<u8> = header
                .value
                .iter()
                .copied()
                .filter(|b| *b != b'\r' && *b != b'\n')
                .collect();
            collapse_wsp(trim_wsp(&unfolded), &mut out);
        }
    }
    out.extend_from_slice(CRLF);
    out
}
