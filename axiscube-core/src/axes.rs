//! Axis descriptor parser
//!
//! One axis per line:
//!
//! ```text
//! # name  title        value  min   max
//! wght    "Weight"     400    100   900
//! wdth    "Width"      100    75    125
//! opsz                 14     8     144
//! ```
//!
//! The title is optional and defaults to the name. Blank lines and `#`
//! comments are ignored.
use nom::{
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{eof, opt, rest},
    number::complete::float,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::catalog::AxisInfo;
use crate::error::{Error, Result};

const EXPECTED: &str = "expected `<name> \"<title>\" <value> <min> <max>`";

/// Parse a whole descriptor into an ordered axis list
pub fn parse_axes(input: &str) -> Result<Vec<AxisInfo>> {
    let mut axes = Vec::new();

    for (i, line) in input.lines().enumerate() {
        let line_number = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let axis = match parse_axis_line(trimmed) {
            Ok((_, axis)) => axis,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(Error::AxisSyntax {
                    line: line_number,
                    reason: format!("{EXPECTED}, found `{}`", e.input),
                })
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(Error::AxisSyntax {
                    line: line_number,
                    reason: EXPECTED.to_string(),
                })
            }
        };

        validate(&axis, line_number)?;
        axes.push(axis);
    }

    Ok(axes)
}

fn validate(axis: &AxisInfo, line: usize) -> Result<()> {
    if ![axis.value, axis.min, axis.max].iter().all(|v| v.is_finite()) {
        return Err(Error::AxisSyntax {
            line,
            reason: format!("axis `{}` has a non-finite number", axis.name),
        });
    }
    if axis.min > axis.max {
        return Err(Error::AxisRange {
            line,
            name: axis.name.clone(),
            min: axis.min,
            max: axis.max,
        });
    }
    Ok(())
}

fn parse_axis_line(input: &str) -> IResult<&str, AxisInfo> {
    let (input, name) = parse_name(input)?;
    let (input, _) = multispace1(input)?;
    let (input, title) = opt(terminated(parse_title, multispace1))(input)?;
    let (input, value) = float(input)?;
    let (input, min) = preceded(multispace1, float)(input)?;
    let (input, max) = preceded(multispace1, float)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(preceded(char('#'), rest))(input)?;
    let (input, _) = eof(input)?;

    let title = title.unwrap_or(name);
    Ok((input, AxisInfo::new(name, title, value, min, max)))
}

fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')(input)
}

fn parse_title(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"'), char('"'))(input)
}
