#![forbid(unsafe_code)]

//! Character property lookups used by reordering and shaping.
//!
//! Directional classes come from `unicode-bidi`'s compiled tables and mark
//! detection from `unicode-normalization`. Mirroring and joining data are
//! compiled into [`crate::tables`].
//!
//! # Process-wide table
//!
//! [`PropsTable::global`] returns the shared table, building it on first use.
//! Initialization is double-checked: a lock-free load, then a mutex, a second
//! load, build and publish. Once published every read is a wait-free
//! `arc-swap` load. [`cleanup`] drops the published table; the next call to
//! `global` rebuilds it.
//!
//! # Example
//!
//! ```
//! use fbidi_core::props::{self, BidiClass};
//!
//! assert_eq!(props::class_of('a'), BidiClass::L);
//! assert_eq!(props::class_of('\u{05D0}'), BidiClass::R);
//! assert_eq!(props::mirror_of('('), ')');
//! assert!(props::is_bidi_control('\u{200F}'));
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use rustc_hash::FxHashMap;

use crate::tables::{self, JOINING_GROUPS, JOINING_TYPES, MIRROR_PAIRS};

pub use unicode_bidi::BidiClass;

// ---------------------------------------------------------------------------
// Joining properties
// ---------------------------------------------------------------------------

/// Unicode Joining_Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoiningType {
    #[default]
    NonJoining,
    JoinCausing,
    DualJoining,
    LeftJoining,
    RightJoining,
    Transparent,
}

impl JoiningType {
    /// True for types that connect to the following letter in logical order.
    #[inline]
    pub const fn joins_forward(self) -> bool {
        matches!(self, Self::DualJoining | Self::JoinCausing | Self::LeftJoining)
    }

    /// True for types that connect to the preceding letter in logical order.
    #[inline]
    pub const fn joins_backward(self) -> bool {
        matches!(self, Self::DualJoining | Self::JoinCausing | Self::RightJoining)
    }
}

/// Unicode Joining_Group, restricted to the groups of the basic Arabic letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoiningGroup {
    #[default]
    NoJoiningGroup,
    Ain,
    Alef,
    Beh,
    Dal,
    FarsiYeh,
    Feh,
    Gaf,
    Hah,
    Heh,
    Kaf,
    Lam,
    Meem,
    Noon,
    Qaf,
    Reh,
    Sad,
    Seen,
    Tah,
    TehMarbuta,
    Waw,
    Yeh,
}

// ---------------------------------------------------------------------------
// PropsTable
// ---------------------------------------------------------------------------

/// Derived lookup structures shared across the process.
#[derive(Debug)]
pub struct PropsTable {
    mirrors: FxHashMap<char, char>,
}

static GLOBAL: ArcSwapOption<PropsTable> = ArcSwapOption::const_empty();
static INIT_LOCK: Mutex<()> = Mutex::new(());

impl PropsTable {
    /// Build a fresh table from the compiled data.
    pub fn build() -> Self {
        let mut mirrors =
            FxHashMap::with_capacity_and_hasher(MIRROR_PAIRS.len() * 2, Default::default());
        for &(a, b) in MIRROR_PAIRS {
            mirrors.insert(a, b);
            mirrors.insert(b, a);
        }
        Self { mirrors }
    }

    /// The shared table, built on first use.
    pub fn global() -> Arc<Self> {
        if let Some(table) = GLOBAL.load_full() {
            return table;
        }
        let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = GLOBAL.load_full() {
            return table;
        }
        let table = Arc::new(Self::build());
        GLOBAL.store(Some(Arc::clone(&table)));
        tracing::debug!(mirror_pairs = table.mirrors.len() / 2, "props table published");
        table
    }

    /// Whether a table is currently published.
    pub fn is_loaded() -> bool {
        GLOBAL.load().is_some()
    }

    #[inline]
    pub fn class_of(&self, c: char) -> BidiClass {
        unicode_bidi::bidi_class(c)
    }

    #[inline]
    pub fn mirror_of(&self, c: char) -> char {
        self.mirrors.get(&c).copied().unwrap_or(c)
    }

    #[inline]
    pub fn is_bidi_control(&self, c: char) -> bool {
        is_bidi_control(c)
    }

    #[inline]
    pub fn is_combining(&self, c: char) -> bool {
        is_combining(c)
    }

    #[inline]
    pub fn joining_type(&self, c: char) -> JoiningType {
        joining_type(c)
    }

    #[inline]
    pub fn joining_group(&self, c: char) -> JoiningGroup {
        joining_group(c)
    }
}

/// Drop the published table. Readers holding an `Arc` keep theirs alive.
pub fn cleanup() {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if GLOBAL.swap(None).is_some() {
        tracing::debug!("props table released");
    }
}

// ---------------------------------------------------------------------------
// Free lookups
// ---------------------------------------------------------------------------

/// Bidi_Class of `c`.
#[inline]
pub fn class_of(c: char) -> BidiClass {
    unicode_bidi::bidi_class(c)
}

/// Bidi_Mirroring_Glyph of `c`, or `c` itself.
pub fn mirror_of(c: char) -> char {
    PropsTable::global().mirror_of(c)
}

/// ALM, ZWNJ, ZWJ, LRM, RLM, the embedding/override controls and the
/// isolate controls.
#[inline]
pub const fn is_bidi_control(c: char) -> bool {
    matches!(c, '\u{061C}' | '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}')
}

/// General_Category Mark (Mn, Mc, Me).
#[inline]
pub fn is_combining(c: char) -> bool {
    unicode_normalization::char::is_combining_mark(c)
}

pub fn joining_type(c: char) -> JoiningType {
    match tables::lookup_range(JOINING_TYPES, c) {
        Some(jt) => jt,
        None if is_combining(c) => JoiningType::Transparent,
        None => JoiningType::NonJoining,
    }
}

pub fn joining_group(c: char) -> JoiningGroup {
    tables::lookup_range(JOINING_GROUPS, c).unwrap_or_default()
}

/// True for strong right-to-left classes.
#[inline]
pub const fn is_rtl_class(class: BidiClass) -> bool {
    matches!(class, BidiClass::R | BidiClass::AL)
}

/// Classes skipped when locating trailing whitespace: whitespace, segment
/// and paragraph separators, boundary neutrals, embedding controls and
/// isolates.
#[inline]
pub const fn is_trailing_ws_class(class: BidiClass) -> bool {
    use BidiClass::*;
    matches!(
        class,
        WS | S | B | BN | LRE | LRO | RLE | RLO | PDF | LRI | RLI | FSI | PDI
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_of_common_scripts() {
        assert_eq!(class_of('A'), BidiClass::L);
        assert_eq!(class_of('\u{0627}'), BidiClass::AL);
        assert_eq!(class_of('\u{05D0}'), BidiClass::R);
        assert_eq!(class_of('5'), BidiClass::EN);
        assert_eq!(class_of('\u{0661}'), BidiClass::AN);
        assert_eq!(class_of(' '), BidiClass::WS);
        assert_eq!(class_of('\u{2029}'), BidiClass::B);
    }

    #[test]
    fn mirroring_is_symmetric() {
        let table = PropsTable::build();
        for &(a, b) in MIRROR_PAIRS {
            assert_eq!(table.mirror_of(a), b);
            assert_eq!(table.mirror_of(b), a);
        }
        assert_eq!(table.mirror_of('x'), 'x');
    }

    #[test]
    fn bidi_controls() {
        for c in ['\u{061C}', '\u{200E}', '\u{200F}', '\u{202A}', '\u{202E}', '\u{2066}', '\u{2069}'] {
            assert!(is_bidi_control(c), "{c:?}");
        }
        for c in ['a', '\u{2010}', '\u{202F}', '\u{2065}', '\u{206A}'] {
            assert!(!is_bidi_control(c), "{c:?}");
        }
    }

    #[test]
    fn combining_marks() {
        assert!(is_combining('\u{0301}'));
        assert!(is_combining('\u{064E}'));
        assert!(!is_combining('e'));
    }

    #[test]
    fn joining_types() {
        assert_eq!(joining_type('\u{0644}'), JoiningType::DualJoining);
        assert_eq!(joining_type('\u{0627}'), JoiningType::RightJoining);
        assert_eq!(joining_type('\u{0621}'), JoiningType::NonJoining);
        assert_eq!(joining_type('\u{0640}'), JoiningType::JoinCausing);
        assert_eq!(joining_type('\u{064E}'), JoiningType::Transparent);
        assert_eq!(joining_type('\u{0301}'), JoiningType::Transparent);
        assert_eq!(joining_type('a'), JoiningType::NonJoining);
        assert!(JoiningType::DualJoining.joins_forward());
        assert!(!JoiningType::RightJoining.joins_forward());
        assert!(JoiningType::RightJoining.joins_backward());
    }

    #[test]
    fn joining_groups() {
        assert_eq!(joining_group('\u{0633}'), JoiningGroup::Seen);
        assert_eq!(joining_group('\u{0636}'), JoiningGroup::Sad);
        assert_eq!(joining_group('\u{0627}'), JoiningGroup::Alef);
        assert_eq!(joining_group('a'), JoiningGroup::NoJoiningGroup);
    }

    #[test]
    fn trailing_ws_classes() {
        assert!(is_trailing_ws_class(class_of(' ')));
        assert!(is_trailing_ws_class(class_of('\t')));
        assert!(is_trailing_ws_class(class_of('\u{202B}')));
        assert!(!is_trailing_ws_class(class_of('a')));
    }

    #[test]
    fn global_table_survives_cleanup_cycle() {
        let first = PropsTable::global();
        assert_eq!(first.mirror_of('['), ']');
        cleanup();
        let second = PropsTable::global();
        assert_eq!(second.mirror_of('['), ']');
        assert!(PropsTable::is_loaded());
        // The handle taken before cleanup stays usable.
        assert_eq!(first.mirror_of('<'), '>');
    }
}
