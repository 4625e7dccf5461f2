#![forbid(unsafe_code)]

//! Joining-link table.
//!
//! Every Arabic code point the shaper knows about has a packed link word:
//! the low byte carries joining capability and special-shape flags, the
//! high byte the offset of its isolated form inside the presentation-form
//! blocks. [`LinkInfo`] wraps that word and names the bits.
//!
//! Lookup order is fixed: the Arabic block table, ZWJ, the deprecated
//! shaping controls, then the two presentation-form tables. Anything else
//! is non-joining, except transparent combining marks, which are treated as
//! irrelevant so they never break a join.

use fbidi_core::props::{self, JoiningGroup, JoiningType};

/// Packed joining-link word for one code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LinkInfo(u16);

const LINK_R: u16 = 1;
const LINK_L: u16 = 2;
const IRRELEVANT: u16 = 4;
const PRESENT_A: u16 = 8;
const LAM: u16 = 16;
const ALEF: u16 = 32;
const SHADDA: u16 = 64;
const COMBINING_SHADDA: u16 = 128;

impl LinkInfo {
    /// No joining ability at all.
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The two joining bits as a table index (0..=3).
    #[inline]
    pub const fn joins(self) -> usize {
        (self.0 & (LINK_R | LINK_L)) as usize
    }

    /// Joins to the character on its right (visually).
    #[inline]
    pub const fn links_right(self) -> bool {
        self.0 & LINK_R != 0
    }

    /// Joins to the character on its left (visually).
    #[inline]
    pub const fn links_left(self) -> bool {
        self.0 & LINK_L != 0
    }

    /// Transparent for joining purposes (marks, shaping controls).
    #[inline]
    pub const fn is_irrelevant(self) -> bool {
        self.0 & IRRELEVANT != 0
    }

    /// Forms live in the `U+FB50` block rather than `U+FE70`.
    #[inline]
    pub const fn in_presentation_a(self) -> bool {
        self.0 & PRESENT_A != 0
    }

    #[inline]
    pub const fn is_lam(self) -> bool {
        self.0 & LAM != 0
    }

    #[inline]
    pub const fn is_alef(self) -> bool {
        self.0 & ALEF != 0
    }

    /// One of the pair is Shadda and the other a vowel Shadda combines with.
    #[inline]
    pub const fn combines_with(self, other: Self) -> bool {
        (self.0 | other.0) & (SHADDA | COMBINING_SHADDA) == SHADDA | COMBINING_SHADDA
    }

    /// Offset of the isolated form from the start of its presentation block.
    #[inline]
    pub const fn offset(self) -> u32 {
        (self.0 >> 8) as u32
    }

    /// Has more than one presentation form, or is transparent.
    #[inline]
    pub const fn is_shapeable(self) -> bool {
        self.offset() > 0 || self.is_irrelevant()
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const R: u16 = LINK_R;
const D: u16 = LINK_R | LINK_L;
const A: u16 = ALEF;
const I: u16 = IRRELEVANT;
const P: u16 = PRESENT_A;

const fn at(offset: u16) -> u16 {
    offset << 8
}

/// `U+0622..=U+06D3`.
#[rustfmt::skip]
static ARABIC_LINKS: [u16; 178] = [
    // 0622
    R | A | at(0x11), R | A | at(0x13), R | at(0x15), R | A | at(0x17),
    D | at(0x19), R | A | at(0x1D),
    // 0628
    D | at(0x1F), R | at(0x23), D | at(0x25), D | at(0x29),
    D | at(0x2D), D | at(0x31), D | at(0x35), R | at(0x39),
    // 0630
    R | at(0x3B), R | at(0x3D), R | at(0x3F), D | at(0x41),
    D | at(0x45), D | at(0x49), D | at(0x4D), D | at(0x51),
    // 0638
    D | at(0x55), D | at(0x59), D | at(0x5D), 0, 0, 0, 0, 0,
    // 0640
    D, D | at(0x61), D | at(0x65), D | at(0x69),
    D | LAM | at(0x6D), D | at(0x71), D | at(0x75), D | at(0x79),
    // 0648
    R | at(0x7D), R | at(0x7F), D | at(0x81), I | at(1),
    I | COMBINING_SHADDA | at(1), I | COMBINING_SHADDA | at(1),
    I | COMBINING_SHADDA | at(1), I | COMBINING_SHADDA | at(1),
    // 0650
    I | COMBINING_SHADDA | at(1), I | SHADDA | at(3), I | at(1), I | at(7),
    I | at(8), I | at(8), I | at(1), 0,
    // 0658
    0, 0, 0, 0, R | at(0x85), R | at(0x87), R | at(0x89), R | at(0x8B),
    // 0660
    0, 0, 0, 0, 0, 0, 0, 0,
    // 0668
    0, 0, 0, 0, 0, 0, 0, 0,
    // 0670
    I | at(6), R | P, R | A, R | A, 0, R | A, R, R,
    // 0678
    D, D | P | at(0x16), D | P | at(0x0E), D | P | at(0x02), D, D, D | P | at(0x06), D,
    // 0680
    D, D, D, D, D, D, D | P | at(0x2A), D,
    // 0688
    R | P | at(0x38), R, R, R, R | P | at(0x34), R | P | at(0x32), R | P | at(0x36), R,
    // 0690
    R, R | P | at(0x3C), R, R, R, R, R, R,
    // 0698
    R | P | at(0x3A), R, D, D, D, D, D, D,
    // 06A0
    D, D, D, D, D, D, D, D,
    // 06A8
    D, D | P | at(0x3E), D, D, D, D, D, D | P | at(0x42),
    // 06B0
    D, D, D, D, D, D, D, D,
    // 06B8
    D, D, R | P | at(0x4E), D | P | at(0x50), D, D, D | P | at(0x5A), D,
    // 06C0
    R | P | at(0x54), D | P | at(0x56), R, R, R, R | P | at(0x90), R | P | at(0x89), R | P | at(0x87),
    // 06C8
    R | P | at(0x8B), R | P | at(0x92), R, R | P | at(0x8E), D | P | at(0xAC), R, D, D,
    // 06D0
    D | P | at(0x94), D, R | P | at(0x5E), R | P | at(0x60),
];

/// `U+FE70..=U+FEFC`: joining ability of the presentation forms themselves.
#[rustfmt::skip]
static PRESENTATION_B_LINKS: [u8; 141] = [
    3, 3, 3, 0, 3, 0, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3,
    0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 2, 3, 0, 1, 0,
    1, 2, 3, 0, 1, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2,
    3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 0, 1, 0, 1, 0,
    1, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2,
    3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2,
    3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2,
    3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 0,
    1, 0, 1, 2, 3, 0, 1, 0, 1, 0, 1, 0, 1,
];

/// `U+FB50..=U+FC62`, sparse.
const fn presentation_a_link(cp: u32) -> u16 {
    match cp {
        0xFB51 | 0xFB57 | 0xFB7B | 0xFB8B | 0xFB8F | 0xFB93 | 0xFBFD => 1,
        0xFB58 | 0xFB7C | 0xFB90 | 0xFB94 | 0xFBFE => 2,
        0xFB59 | 0xFB7D | 0xFB91 | 0xFB95 | 0xFBFF => 3,
        0xFC5E..=0xFC62 => IRRELEVANT,
        _ => 0,
    }
}

/// `U+FB50..=U+FBFF` back to the Arabic block; zero where unmapped.
#[rustfmt::skip]
static PRESENTATION_A_TO_BASE: [u16; 176] = [
    0x671, 0x671, 0x67B, 0x67B, 0x67B, 0x67B, 0x67E, 0x67E, 0x67E, 0x67E, 0, 0, 0, 0, 0x67A, 0x67A,
    0x67A, 0x67A, 0, 0, 0, 0, 0x679, 0x679, 0x679, 0x679, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x686, 0x686, 0x686, 0x686, 0, 0,
    0, 0, 0x68D, 0x68D, 0x68C, 0x68C, 0x68E, 0x68E, 0x688, 0x688, 0x698, 0x698, 0x691, 0x691, 0x6A9, 0x6A9,
    0x6A9, 0x6A9, 0x6AF, 0x6AF, 0x6AF, 0x6AF, 0, 0, 0, 0, 0, 0, 0, 0, 0x6BA, 0x6BA,
    0x6BB, 0x6BB, 0x6BB, 0x6BB, 0x6C0, 0x6C0, 0x6C1, 0x6C1, 0x6C1, 0x6C1, 0x6BE, 0x6BE, 0x6BE, 0x6BE, 0x6D2, 0x6D2,
    0x6D3, 0x6D3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0x6C7, 0x6C7, 0x6C6, 0x6C6, 0x6C8, 0x6C8, 0, 0x6CB, 0x6CB,
    0x6C5, 0x6C5, 0x6C9, 0x6C9, 0x6D0, 0x6D0, 0x6D0, 0x6D0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x6CC, 0x6CC, 0x6CC, 0x6CC,
];

/// `U+FE70..=U+FEFC` back to the Arabic block. LamAlef forms map to the
/// private ligature stand-ins `U+065C..=U+065F`.
#[rustfmt::skip]
static PRESENTATION_B_TO_BASE: [u16; 141] = [
    0x64B, 0x64B, 0x64C, 0x64C, 0x64D, 0x64D, 0x64E, 0x64E, 0x64F, 0x64F, 0x650, 0x650, 0x651, 0x651, 0x652, 0x652,
    0x621, 0x622, 0x622, 0x623, 0x623, 0x624, 0x624, 0x625, 0x625, 0x626, 0x626, 0x626, 0x626, 0x627, 0x627, 0x628,
    0x628, 0x628, 0x628, 0x629, 0x629, 0x62A, 0x62A, 0x62A, 0x62A, 0x62B, 0x62B, 0x62B, 0x62B, 0x62C, 0x62C, 0x62C,
    0x62C, 0x62D, 0x62D, 0x62D, 0x62D, 0x62E, 0x62E, 0x62E, 0x62E, 0x62F, 0x62F, 0x630, 0x630, 0x631, 0x631, 0x632,
    0x632, 0x633, 0x633, 0x633, 0x633, 0x634, 0x634, 0x634, 0x634, 0x635, 0x635, 0x635, 0x635, 0x636, 0x636, 0x636,
    0x636, 0x637, 0x637, 0x637, 0x637, 0x638, 0x638, 0x638, 0x638, 0x639, 0x639, 0x639, 0x639, 0x63A, 0x63A, 0x63A,
    0x63A, 0x641, 0x641, 0x641, 0x641, 0x642, 0x642, 0x642, 0x642, 0x643, 0x643, 0x643, 0x643, 0x644, 0x644, 0x644,
    0x644, 0x645, 0x645, 0x645, 0x645, 0x646, 0x646, 0x646, 0x646, 0x647, 0x647, 0x647, 0x647, 0x648, 0x648, 0x649,
    0x649, 0x64A, 0x64A, 0x64A, 0x64A, 0x65C, 0x65C, 0x65D, 0x65D, 0x65E, 0x65E, 0x65F, 0x65F,
];

/// Shape index by `[next][last][current]` joining bits:
/// 0 isolated, 1 final, 2 initial, 3 medial.
#[rustfmt::skip]
pub(crate) static SHAPE_TABLE: [[[u8; 4]; 4]; 4] = [
    [[0, 0, 0, 0], [0, 0, 0, 0], [0, 1, 0, 3], [0, 1, 0, 1]],
    [[0, 0, 2, 2], [0, 0, 1, 2], [0, 1, 1, 2], [0, 1, 1, 3]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [0, 1, 0, 3], [0, 1, 0, 3]],
    [[0, 0, 1, 2], [0, 0, 1, 2], [0, 1, 1, 2], [0, 1, 1, 3]],
];

/// Offsets of the isolated tashkeel forms from `U+FE70`, indexed from
/// `U+064B`.
pub(crate) static TASHKEEL_FORM_OFFSET: [u32; 8] = [0x0, 0x2, 0x4, 0x6, 0x8, 0xA, 0xC, 0xE];

/// `U+FE70..=U+FE7F`: 1 where the form sits on a tatweel.
static TASHKEEL_MEDIAL: [u8; 16] = [0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1];

/// `U+FEB1..=U+FEBE`: 1 for isolated and final Seen-family forms.
static SEEN_TAIL_FAMILY: [u8; 14] = [1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1];

// ---------------------------------------------------------------------------
// Named characters
// ---------------------------------------------------------------------------

pub(crate) const SPACE: char = ' ';
pub(crate) const LAM_CHAR: char = '\u{0644}';
pub(crate) const TATWEEL: char = '\u{0640}';
pub(crate) const SHADDA_BASE: char = '\u{0651}';
pub(crate) const SHADDA_ISOLATED: char = '\u{FE7C}';
pub(crate) const SHADDA_TATWEEL: char = '\u{FE7D}';
pub(crate) const HAMZA_BASE: char = '\u{0621}';
pub(crate) const HAMZA_ISOLATED: char = '\u{FE80}';
pub(crate) const YEH_HAMZA: char = '\u{0626}';
pub(crate) const LAMALEF_PLACEHOLDER: char = '\u{FFFF}';
pub(crate) const TASHKEEL_PLACEHOLDER: char = '\u{FFFE}';

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Link word for `c`.
pub fn link_of(c: char) -> LinkInfo {
    let cp = c as u32;
    let bits = match cp {
        0x0622..=0x06D3 => ARABIC_LINKS[(cp - 0x0622) as usize],
        0x200D => D,
        0x206D..=0x206F => IRRELEVANT,
        0xFB50..=0xFC62 => presentation_a_link(cp),
        0xFE70..=0xFEFC => u16::from(PRESENTATION_B_LINKS[(cp - 0xFE70) as usize]),
        _ => 0,
    };
    if bits == 0 && props::joining_type(c) == JoiningType::Transparent {
        return LinkInfo(IRRELEVANT);
    }
    LinkInfo(bits)
}

/// Base Arabic letter for a presentation form, or `None` when `c` is not a
/// mapped presentation form. LamAlef forms map to `U+065C..=U+065F`.
pub fn base_of(c: char) -> Option<char> {
    let cp = c as u32;
    let base = match cp {
        0xFB50..=0xFBFF => PRESENTATION_A_TO_BASE[(cp - 0xFB50) as usize],
        0xFE70..=0xFEFC => PRESENTATION_B_TO_BASE[(cp - 0xFE70) as usize],
        _ => 0,
    };
    if base == 0 {
        None
    } else {
        char::from_u32(u32::from(base))
    }
}

/// `base + offset` as a char; presentation-form arithmetic never leaves the
/// BMP letter blocks, so a miss keeps `fallback`.
#[inline]
pub(crate) fn form(base: u32, offset: u32, fallback: char) -> char {
    char::from_u32(base + offset).unwrap_or(fallback)
}

#[inline]
pub(crate) const fn is_tashkeel(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{0652}')
}

#[inline]
pub(crate) const fn is_lam_alef(c: char) -> bool {
    matches!(c, '\u{FEF5}'..='\u{FEFC}')
}

#[inline]
pub(crate) const fn is_tail(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{FE73}')
}

#[inline]
pub(crate) const fn is_alef_maksoura(c: char) -> bool {
    matches!(c, '\u{FEEF}' | '\u{FEF0}' | '\u{0649}')
}

#[inline]
pub(crate) const fn is_yeh_hamza_form(c: char) -> bool {
    matches!(c, '\u{FE89}' | '\u{FE8A}')
}

/// Yeh without hamza for an isolated or final Yeh-Hamza form.
pub(crate) const fn yeh_for(c: char) -> char {
    match c {
        '\u{FE8A}' => '\u{FEF0}',
        _ => '\u{FEEF}',
    }
}

/// Isolated or final Seen-family presentation form.
pub(crate) fn is_seen_tail_family(c: char) -> bool {
    let cp = c as u32;
    (0xFEB1..=0xFEBE).contains(&cp) && SEEN_TAIL_FAMILY[(cp - 0xFEB1) as usize] == 1
}

/// Seen, Sheen, Sad or Dad in the Arabic block.
pub(crate) fn is_seen_family(c: char) -> bool {
    matches!(c, '\u{0633}'..='\u{0636}')
        && matches!(props::joining_group(c), JoiningGroup::Seen | JoiningGroup::Sad)
}

/// Alef in a LamAlef ligature, by ligature form.
pub(crate) const fn alef_of_lam_alef(c: char) -> char {
    match c {
        '\u{FEF5}' | '\u{FEF6}' => '\u{0622}',
        '\u{FEF7}' | '\u{FEF8}' => '\u{0623}',
        '\u{FEF9}' | '\u{FEFA}' => '\u{0625}',
        _ => '\u{0627}',
    }
}

/// Ligature stand-in for an Alef following Lam.
pub(crate) const fn lam_alef_stand_in(alef: char) -> Option<char> {
    match alef {
        '\u{0622}' => Some('\u{065C}'),
        '\u{0623}' => Some('\u{065D}'),
        '\u{0625}' => Some('\u{065E}'),
        '\u{0627}' => Some('\u{065F}'),
        _ => None,
    }
}

/// 1 for a tashkeel form on tatweel, 2 for Shadda combinations on tatweel.
pub(crate) fn tashkeel_on_tatweel(c: char) -> u8 {
    let cp = c as u32;
    match cp {
        0xFE70..=0xFE7F if !matches!(cp, 0xFE73 | 0xFE75 | 0xFE7D) => {
            TASHKEEL_MEDIAL[(cp - 0xFE70) as usize]
        }
        0xFCF2..=0xFCF4 | 0xFE7D => 2,
        _ => 0,
    }
}

/// Tashkeel in an isolated (not on tatweel) presentation form.
pub(crate) fn is_isolated_tashkeel(c: char) -> bool {
    let cp = c as u32;
    match cp {
        0xFE70..=0xFE7F if !matches!(cp, 0xFE73 | 0xFE75) => {
            TASHKEEL_MEDIAL[(cp - 0xFE70) as usize] == 0
        }
        0xFC5E..=0xFC63 => true,
        _ => false,
    }
}
