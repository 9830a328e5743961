//! Permalink template parsing.
//!
//! # Responsibilities
//! - Split a template string into an ordered sequence of typed tokens
//! - Recognize the ten `%marker%` placeholders; everything else is a literal
//! - Compute the positions of the identifying tokens (`%post_id%`,
//!   `%postname%`) for path alignment

/// One segment of a parsed permalink template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    /// A fixed path segment. Anchors the path but carries no resolvable value.
    Literal(String),
    /// `%year%` - four-digit year of the post.
    Year,
    /// `%monthnum%` - two-digit month.
    Month,
    /// `%day%` - two-digit day of month.
    Day,
    /// `%hour%` - two-digit hour.
    Hour,
    /// `%minute%` - two-digit minute.
    Minute,
    /// `%second%` - two-digit second.
    Second,
    /// `%post_id%` - the unique numeric ID of the post.
    PostId,
    /// `%postname%` - the post slug.
    PostName,
    /// `%category%` - category slug.
    Category,
    /// `%author%` - author name slug.
    Author,
}

impl TemplateToken {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "%year%" => TemplateToken::Year,
            "%monthnum%" => TemplateToken::Month,
            "%day%" => TemplateToken::Day,
            "%hour%" => TemplateToken::Hour,
            "%minute%" => TemplateToken::Minute,
            "%second%" => TemplateToken::Second,
            "%post_id%" => TemplateToken::PostId,
            "%postname%" => TemplateToken::PostName,
            "%category%" => TemplateToken::Category,
            "%author%" => TemplateToken::Author,
            other => TemplateToken::Literal(other.to_string()),
        }
    }

    /// Returns true if this token is a fixed path segment rather than a placeholder.
    pub fn is_literal(&self) -> bool {
        matches!(self, TemplateToken::Literal(_))
    }
}

/// Parse a permalink template into ordered tokens.
///
/// Splits on `/` and drops empty segments, so leading and trailing slashes
/// are permitted and ignored. Never fails: unrecognized segments become
/// [`TemplateToken::Literal`].
pub fn parse(template: &str) -> Vec<TemplateToken> {
    template
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(TemplateToken::from_segment)
        .collect()
}

/// Token positions for aligning an incoming path against the post template.
///
/// Only `%post_id%` and `%postname%` can uniquely identify content; if both
/// are absent no post can ever be resolved from a root-shared path.
#[derive(Debug, Clone)]
pub struct TemplatePositions {
    /// The full token sequence, in template order.
    pub tokens: Vec<TemplateToken>,
    /// Total number of segments, literals included. An incoming path can
    /// only denote a post if its length equals this count.
    pub segment_count: usize,
    /// Index of the `%post_id%` token, if present.
    pub id_pos: Option<usize>,
    /// Index of the `%postname%` token, if present.
    pub name_pos: Option<usize>,
}

impl TemplatePositions {
    /// Parse a template and locate its identifying tokens.
    pub fn from_template(template: &str) -> Self {
        let tokens = parse(template);
        let mut id_pos = None;
        let mut name_pos = None;
        for (index, token) in tokens.iter().enumerate() {
            match token {
                TemplateToken::PostId => id_pos = Some(index),
                TemplateToken::PostName => name_pos = Some(index),
                _ => {}
            }
        }
        Self {
            segment_count: tokens.len(),
            tokens,
            id_pos,
            name_pos,
        }
    }

    /// Returns true if the template can never identify a specific post.
    pub fn is_page_only(&self) -> bool {
        self.id_pos.is_none() && self.name_pos.is_none()
    }
}
