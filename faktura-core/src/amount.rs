//! Amount tokens in the invoice locale.
//!
//! Amounts use `,` as decimal separator and `.` to group thousands:
//! `12.345,67`, `-1234,56`. A space ends the token.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::AmountError;

/// Parse one amount token into a signed decimal.
pub fn parse_amount(token: &str) -> Result<Decimal, AmountError> {
    let mut buf = String::with_capacity(token.len());

    for (i, ch) in token.chars().enumerate() {
        match ch {
            '0'..='9' => buf.push(ch),
            '-' if i == 0 => buf.push(ch),
            _ if i == 0 => return Err(AmountError::MalformedAmount(token.to_string())),
            '.' => {}
            ',' => buf.push('.'),
            ' ' => break,
            other => {
                return Err(AmountError::InvalidAmountChar {
                    ch: other,
                    input: token.to_string(),
                });
            }
        }
    }

    convert(&buf)
}

/// Convert the normalized buffer (`-?digits(.digits)?`) into a decimal.
fn convert(buf: &str) -> Result<Decimal, AmountError> {
    let (negative, body) = match buf.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, buf),
    };

    let int_len = body.bytes().take_while(u8::is_ascii_digit).count();
    let (int_part, after_int) = body.split_at(int_len);
    let (frac_part, rest) = match after_int.strip_prefix('.') {
        Some(tail) => {
            let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
            tail.split_at(frac_len)
        }
        None => ("", after_int),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::AmountParseFailure(buf.to_string()));
    }

    let mut canonical = String::with_capacity(buf.len() + 1);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        canonical.push('.');
        canonical.push_str(frac_part);
    }

    let amount = Decimal::from_str(&canonical)
        .map_err(|_| AmountError::AmountParseFailure(buf.to_string()))?;

    if !rest.is_empty() {
        return Err(AmountError::TrailingGarbage {
            amount: canonical,
            rest: rest.to_string(),
        });
    }

    Ok(amount)
}
