/// Line-oriented parser for `.msg`, `.srv`, and `.action` text
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::errors::{ParseError, ParseResult};
use crate::types::{Action, ArraySpec, Field, InterfaceKind, Message, RosType, Service, TypeName};

/// Literal line separating field groups
pub const GROUP_SEPARATOR: &str = "---";

/// Start of a comment, to end of line
pub const COMMENT_DELIMITER: char = '#';

// One field declaration: TYPE [ARRAY]? NAME (= VALUE)?, optionally followed
// by an inline comment. The VALUE token must end in a word-class character so
// that a directly attached comment ("3# note") is not captured as part of it.
// The `[<=N]` bound qualifier is accepted and recorded as a fixed length.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?P<type>[A-Za-z0-9_/-]+)(?P<array>\[(?:<=)?(?P<len>\d+)?\])?\s+(?P<name>[A-Za-z0-9_/-]+)(?:\s*=\s*(?P<value>\S*[A-Za-z0-9_/"-]))?\s*(?:#.*)?$"#,
    )
    .expect("field declaration regex is valid")
});

/// Parse interface text into `---`-separated groups of fields
///
/// Parsing is strict: any non-blank, non-comment, non-separator line that
/// does not match the field grammar rejects the whole input. Blank and
/// comment-only lines never produce fields and never open or close a group.
///
/// # Errors
///
/// Returns [`ParseError::MalformedField`] for a line that cannot be
/// tokenized, including a field line indented more than one tab level past
/// its parent.
pub fn parse_groups(text: &str) -> ParseResult<Vec<Vec<Field>>> {
    let mut done: Vec<Vec<Field>> = Vec::new();
    let mut current: Vec<Field> = Vec::new();
    // Open parent fields, one per nesting level. A field is attached to its
    // parent (or to the current group) once its nested block ends.
    let mut stack: Vec<Field> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_DELIMITER) {
            continue;
        }
        if trimmed == GROUP_SEPARATOR {
            close_open_fields(&mut stack, &mut current);
            done.push(std::mem::take(&mut current));
            continue;
        }

        let depth = line.chars().take_while(|&c| c == '\t').count();
        if depth > stack.len() {
            return Err(ParseError::MalformedField {
                line: idx + 1,
                content: line.to_string(),
            });
        }
        while stack.len() > depth {
            attach_top(&mut stack, &mut current);
        }

        let field = parse_field_line(&line[depth..], idx + 1)?;
        stack.push(field);
    }

    close_open_fields(&mut stack, &mut current);
    done.push(current);
    Ok(done)
}

/// Pop the innermost open field and attach it to its parent, or to the
/// current group when it is a top-level field
fn attach_top(stack: &mut Vec<Field>, current: &mut Vec<Field>) {
    if let Some(field) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(field),
            None => current.push(field),
        }
    }
}

fn close_open_fields(stack: &mut Vec<Field>, current: &mut Vec<Field>) {
    while !stack.is_empty() {
        attach_top(stack, current);
    }
}

/// Tokenize a single field declaration line (indentation already stripped)
fn parse_field_line(line: &str, line_number: usize) -> ParseResult<Field> {
    let malformed = || ParseError::MalformedField {
        line: line_number,
        content: line.to_string(),
    };

    let captures = FIELD_RE.captures(line).ok_or_else(malformed)?;

    let ty = TypeName::parse(&captures["type"]);
    let name = captures["name"].to_string();

    let array = if captures.name("array").is_some() {
        match captures.name("len") {
            Some(len) => ArraySpec::Fixed(len.as_str().parse().map_err(|_| malformed())?),
            None => ArraySpec::Unbounded,
        }
    } else {
        ArraySpec::Scalar
    };

    let mut field = Field::new(ty, name).with_array(array);
    if let Some(value) = captures.name("value") {
        field = field.with_value(value.as_str());
    }
    Ok(field)
}

fn expect_groups(expected: usize, groups: Vec<Vec<Field>>) -> ParseResult<Vec<Vec<Field>>> {
    if groups.len() == expected {
        Ok(groups)
    } else {
        Err(ParseError::GroupCountMismatch {
            expected,
            actual: groups.len(),
        })
    }
}

/// Parse message text (exactly one field group)
///
/// # Errors
///
/// Returns [`ParseError::MalformedField`] for unparseable lines and
/// [`ParseError::GroupCountMismatch`] if the text contains a `---` separator.
pub fn parse_message(name: TypeName, text: &str) -> ParseResult<Message> {
    let mut groups = expect_groups(InterfaceKind::Message.expected_groups(), parse_groups(text)?)?;
    Ok(Message {
        name,
        fields: groups.pop().unwrap_or_default(),
    })
}

/// Parse service text (request and response groups)
///
/// # Errors
///
/// Returns [`ParseError::MalformedField`] for unparseable lines and
/// [`ParseError::GroupCountMismatch`] unless exactly one `---` separator is
/// present.
pub fn parse_service(name: TypeName, text: &str) -> ParseResult<Service> {
    let groups = expect_groups(InterfaceKind::Service.expected_groups(), parse_groups(text)?)?;
    let mut iter = groups.into_iter();
    Ok(Service {
        name,
        request: iter.next().unwrap_or_default(),
        response: iter.next().unwrap_or_default(),
    })
}

/// Parse action text (goal, result, and feedback groups)
///
/// # Errors
///
/// Returns [`ParseError::MalformedField`] for unparseable lines and
/// [`ParseError::GroupCountMismatch`] unless exactly two `---` separators are
/// present.
pub fn parse_action(name: TypeName, text: &str) -> ParseResult<Action> {
    let groups = expect_groups(InterfaceKind::Action.expected_groups(), parse_groups(text)?)?;
    let mut iter = groups.into_iter();
    Ok(Action {
        name,
        goal: iter.next().unwrap_or_default(),
        result: iter.next().unwrap_or_default(),
        feedback: iter.next().unwrap_or_default(),
    })
}

/// Parse interface text for a known kind
///
/// # Errors
///
/// Propagates the errors of [`parse_message`], [`parse_service`], and
/// [`parse_action`].
pub fn parse_ros_type(kind: InterfaceKind, name: TypeName, text: &str) -> ParseResult<RosType> {
    match kind {
        InterfaceKind::Message => Ok(RosType::Message(parse_message(name, text)?)),
        InterfaceKind::Service => Ok(RosType::Service(parse_service(name, text)?)),
        InterfaceKind::Action => Ok(RosType::Action(parse_action(name, text)?)),
    }
}

/// Parse an interface file, deriving the kind from the extension and the
/// local type name from the file stem
///
/// # Errors
///
/// Returns [`ParseError::InvalidFileName`] for paths without a usable stem,
/// [`ParseError::UnsupportedExtension`] for extensions other than
/// `.msg`/`.srv`/`.action`, and propagates IO and parse errors.
pub fn parse_interface_file<P: AsRef<Path>>(
    package: Option<&str>,
    path: P,
) -> ParseResult<RosType> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ParseError::InvalidFileName {
            path: path.to_path_buf(),
        })?;
    let kind =
        InterfaceKind::from_extension(extension).ok_or_else(|| ParseError::UnsupportedExtension {
            extension: extension.to_string(),
        })?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ParseError::InvalidFileName {
            path: path.to_path_buf(),
        })?;

    let name = match package {
        Some(pkg) if !pkg.is_empty() => TypeName::qualified(pkg, stem),
        _ => TypeName::local(stem),
    };

    let content = fs::read_to_string(path)?;
    parse_ros_type(kind, name, &content)
}
