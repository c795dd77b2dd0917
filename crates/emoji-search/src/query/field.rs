//! Query field names.

use bitflags::bitflags;

/// The closed set of fields a query clause may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    /// `u:` - any codepoint in a hex range.
    Codepoints,
    /// `emoji:` - Unicode Emoji version.
    EmojiLevel,
    /// `api:` - any supported API level.
    ApiSupport,
    /// `api_added:` - the level that introduced the sequence.
    ApiAdded,
    /// `note:` - free-text notes.
    Notes,
    /// `diff:` - visual difference between visible levels.
    Diffs,
}

impl FieldName {
    pub const ALL: [FieldName; 6] = [
        Self::Codepoints,
        Self::EmojiLevel,
        Self::ApiSupport,
        Self::ApiAdded,
        Self::Notes,
        Self::Diffs,
    ];

    /// Looks up the field for a clause prefix. Names are case sensitive.
    pub fn from_query_name(name: &str) -> Option<Self> {
        match name {
            "u" => Some(Self::Codepoints),
            "emoji" => Some(Self::EmojiLevel),
            "api" => Some(Self::ApiSupport),
            "api_added" => Some(Self::ApiAdded),
            "note" => Some(Self::Notes),
            "diff" => Some(Self::Diffs),
            _ => None,
        }
    }

    /// The prefix used in queries.
    pub fn query_name(self) -> &'static str {
        match self {
            Self::Codepoints => "u",
            Self::EmojiLevel => "emoji",
            Self::ApiSupport => "api",
            Self::ApiAdded => "api_added",
            Self::Notes => "note",
            Self::Diffs => "diff",
        }
    }

    pub(crate) fn flag(self) -> FieldSet {
        match self {
            Self::Codepoints => FieldSet::CODEPOINTS,
            Self::EmojiLevel => FieldSet::EMOJI_LEVEL,
            Self::ApiSupport => FieldSet::API_SUPPORT,
            Self::ApiAdded => FieldSet::API_ADDED,
            Self::Notes => FieldSet::NOTES,
            Self::Diffs => FieldSet::DIFFS,
        }
    }
}

bitflags! {
    /// Fields referenced by a compiled query.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldSet: u8 {
        const CODEPOINTS = 1 << 0;
        const EMOJI_LEVEL = 1 << 1;
        const API_SUPPORT = 1 << 2;
        const API_ADDED = 1 << 3;
        const NOTES = 1 << 4;
        const DIFFS = 1 << 5;
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<FieldName> for FieldSet {
    fn from_iter<T: IntoIterator<Item = FieldName>>(iter: T) -> Self {
        iter.into_iter()
            .fold(FieldSet::empty(), |set, field| set | field.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_names_round_trip() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::from_query_name(field.query_name()), Some(field));
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(FieldName::from_query_name("API"), None);
        assert_eq!(FieldName::from_query_name("Note"), None);
    }

    #[test]
    fn field_set_collects_flags() {
        let set: FieldSet = [FieldName::ApiSupport, FieldName::Notes].into_iter().collect();
        assert!(set.contains(FieldSet::API_SUPPORT));
        assert!(set.contains(FieldSet::NOTES));
        assert!(!set.contains(FieldSet::API_ADDED));
    }
}
