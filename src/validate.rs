use serde_json::Value;

use crate::formats::{Difficulty, LessonDocument, RawRecord};

pub const MIN_CHAPTER: u8 = 1;
pub const MAX_CHAPTER: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field `{field}`: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    NonEmptyString,
    String,
    Integer { min: i64, max: Option<i64> },
    OneOf(&'static [&'static str]),
    StringList,
}

#[derive(Debug, Clone, Copy)]
struct FieldSpec {
    name: &'static str,
    required: bool,
    rule: Rule,
}

const LESSON_SCHEMA: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        required: true,
        rule: Rule::NonEmptyString,
    },
    FieldSpec {
        name: "description",
        required: true,
        rule: Rule::NonEmptyString,
    },
    FieldSpec {
        name: "chapter",
        required: true,
        rule: Rule::Integer {
            min: MIN_CHAPTER as i64,
            max: Some(MAX_CHAPTER as i64),
        },
    },
    FieldSpec {
        name: "order",
        required: true,
        rule: Rule::Integer {
            min: 1,
            max: Some(u32::MAX as i64),
        },
    },
    FieldSpec {
        name: "difficulty",
        required: true,
        rule: Rule::OneOf(&Difficulty::NAMES),
    },
    FieldSpec {
        name: "objectives",
        required: true,
        rule: Rule::StringList,
    },
    FieldSpec {
        name: "duration",
        required: true,
        rule: Rule::String,
    },
    FieldSpec {
        name: "tags",
        required: false,
        rule: Rule::StringList,
    },
];

/// Checks a raw record against the lesson schema and converts it into a typed document.
///
/// Fields are checked in schema order and the first failure is reported. Fields not
/// named by the schema are ignored. An explicit `null` is a type error, even for
/// optional fields. Uniqueness of `id` is a catalog concern.
pub fn validate(raw: &RawRecord) -> Result<LessonDocument, ValidationError> {
    if raw.id.trim().is_empty() {
        return Err(ValidationError::new("id", "must not be empty"));
    }

    for spec in LESSON_SCHEMA {
        match raw.fields.get(spec.name) {
            None if spec.required => {
                return Err(ValidationError::new(spec.name, "required field is missing"));
            }
            None => {}
            Some(value) => check_rule(spec.rule, value)
                .map_err(|reason| ValidationError::new(spec.name, reason))?,
        }
    }

    let difficulty = str_field(raw, "difficulty")
        .parse::<Difficulty>()
        .map_err(|reason| ValidationError::new("difficulty", reason))?;

    Ok(LessonDocument {
        id: raw.id.clone(),
        title: str_field(raw, "title").to_owned(),
        description: str_field(raw, "description").to_owned(),
        chapter: int_field(raw, "chapter") as u8,
        order: int_field(raw, "order") as u32,
        difficulty,
        objectives: list_field(raw, "objectives"),
        duration: str_field(raw, "duration").to_owned(),
        tags: list_field(raw, "tags"),
    })
}

/// Validates every record, returning all documents or every failure tagged with its record id.
pub fn validate_all(
    records: &[RawRecord],
) -> Result<Vec<LessonDocument>, Vec<(String, ValidationError)>> {
    let mut documents = Vec::with_capacity(records.len());
    let mut failures = Vec::new();
    for record in records {
        match validate(record) {
            Ok(document) => documents.push(document),
            Err(err) => {
                tracing::debug!(id = %record.id, field = %err.field, reason = %err.reason, "rejected lesson record");
                failures.push((record.id.clone(), err));
            }
        }
    }

    if failures.is_empty() {
        Ok(documents)
    } else {
        Err(failures)
    }
}

fn check_rule(rule: Rule, value: &Value) -> Result<(), String> {
    match rule {
        Rule::String => expect_str(value).map(|_| ()),
        Rule::NonEmptyString => {
            if expect_str(value)?.trim().is_empty() {
                return Err("must not be empty".to_owned());
            }
            Ok(())
        }
        Rule::Integer { min, max } => {
            let n = match (value.as_i64(), value.as_u64()) {
                (Some(n), _) => n,
                (None, Some(big)) => {
                    return Err(match max {
                        Some(max) => format!("must be at most {max}, found {big}"),
                        None => format!("integer {big} is out of range"),
                    });
                }
                (None, None) => {
                    return Err(format!("expected integer, found {}", type_name(value)));
                }
            };
            if n < min {
                return Err(format!("must be at least {min}, found {n}"));
            }
            if let Some(max) = max
                && n > max
            {
                return Err(format!("must be at most {max}, found {n}"));
            }
            Ok(())
        }
        Rule::OneOf(allowed) => {
            let s = expect_str(value)?;
            if !allowed.contains(&s) {
                return Err(format!(
                    "must be one of [{}], found `{s}`",
                    allowed.join(", ")
                ));
            }
            Ok(())
        }
        Rule::StringList => {
            let items = value
                .as_array()
                .ok_or_else(|| format!("expected list of strings, found {}", type_name(value)))?;
            for (idx, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(format!(
                        "item {idx} must be a string, found {}",
                        type_name(item)
                    ));
                }
            }
            Ok(())
        }
    }
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected string, found {}", type_name(value)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

// The accessors below run after the schema pass, so shapes are already known.

fn str_field<'a>(raw: &'a RawRecord, name: &str) -> &'a str {
    raw.fields.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn int_field(raw: &RawRecord, name: &str) -> i64 {
    raw.fields.get(name).and_then(Value::as_i64).unwrap_or_default()
}

fn list_field(raw: &RawRecord, name: &str) -> Vec<String> {
    raw.fields
        .get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
