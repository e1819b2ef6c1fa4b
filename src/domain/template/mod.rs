// Naming template - Placeholder validation and rendering

use std::fmt;

use crate::domain::errors::DomainError;
use crate::domain::model::RenderContext;

/// Placeholders a naming template may reference
pub const RECOGNIZED_PLACEHOLDERS: [&str; 5] = ["id", "y", "n", "res", "run"];

/// Characters that cannot appear inside a substituted value
const UNSAFE_VALUE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// A recognized placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{id}` catalog id
    Id,
    /// `{y}` four-digit release year
    Year,
    /// `{n}` resolved title
    Name,
    /// `{res}` resolution such as `1080p`
    Resolution,
    /// `{run}` runtime in whole minutes
    Runtime,
}

impl Placeholder {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(Placeholder::Id),
            "y" => Some(Placeholder::Year),
            "n" => Some(Placeholder::Name),
            "res" => Some(Placeholder::Resolution),
            "run" => Some(Placeholder::Runtime),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Placeholder::Id => "id",
            Placeholder::Year => "y",
            Placeholder::Name => "n",
            Placeholder::Resolution => "res",
            Placeholder::Runtime => "run",
        }
    }

    fn value(&self, context: &RenderContext) -> String {
        match self {
            Placeholder::Id => context.id.to_string(),
            Placeholder::Year => context.year.clone(),
            Placeholder::Name => context.name.clone(),
            Placeholder::Resolution => context.resolution.clone(),
            Placeholder::Runtime => context.runtime_minutes.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// An operator-supplied naming template, validated at construction.
///
/// Holding a `NamingTemplate` means every placeholder in it is recognized, so
/// parse it before any probing or network work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NamingTemplate {
    /// Parse and validate a template string
    pub fn parse(template: &str) -> Result<Self, DomainError> {
        if template.trim().is_empty() {
            return Err(DomainError::TemplateValidationFailure(
                "Template cannot be empty".to_string(),
            ));
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' => {
                    let mut key = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        match inner {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(DomainError::TemplateValidationFailure(format!(
                                    "Nested '{{' in placeholder starting at offset {}",
                                    offset
                                )));
                            }
                            other => key.push(other),
                        }
                    }
                    if !closed {
                        return Err(DomainError::TemplateValidationFailure(format!(
                            "Unclosed placeholder starting at offset {}",
                            offset
                        )));
                    }

                    let placeholder = Placeholder::from_key(&key).ok_or_else(|| {
                        DomainError::TemplateValidationFailure(format!(
                            "Unknown placeholder {{{}}}. Valid placeholders: {}",
                            key,
                            RECOGNIZED_PLACEHOLDERS
                                .iter()
                                .map(|p| format!("{{{}}}", p))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ))
                    })?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(placeholder));
                }
                '}' => {
                    return Err(DomainError::TemplateValidationFailure(format!(
                        "Unmatched '}}' at offset {}",
                        offset
                    )));
                }
                other => literal.push(other),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Placeholders referenced by this template, in order of appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field(placeholder) => Some(*placeholder),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Substitute every placeholder and append `extension` (without the dot)
    /// exactly as given.
    pub fn render(&self, context: &RenderContext, extension: &str) -> String {
        let mut rendered = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Field(placeholder) => {
                    rendered.push_str(&sanitize_value(&placeholder.value(context)))
                }
            }
        }

        if !extension.is_empty() {
            rendered.push('.');
            rendered.push_str(extension);
        }

        rendered
    }
}

impl fmt::Display for NamingTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Replace path-unsafe characters in a substituted value
fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .map(|c| if UNSAFE_VALUE_CHARS.contains(&c) { '-' } else { c })
        .collect()
}
