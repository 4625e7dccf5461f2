#![forbid(unsafe_code)]

//! Letter shaping and deshaping over a visual-LTR working buffer.
//!
//! # Design
//!
//! Shaping runs in two passes. The first is read-only: it looks up the
//! link word of every position and, for each one, the link of the nearest
//! non-transparent position to its left. The second walks right to left
//! with the previously shaped neighbor in hand and rewrites each
//! shapeable position to its presentation form.
//!
//! A Lam followed (in walk order) by an Alef becomes one ligature written
//! into the Lam's slot; the Alef's slot receives a placeholder that
//! [`crate::spaces`] later resolves according to the Lam-Alef policy.
//! Tashkeel removed under a Begin/End/Resize policy leaves a placeholder of
//! its own.

use crate::link::{
    self, HAMZA_BASE, HAMZA_ISOLATED, LAMALEF_PLACEHOLDER, LinkInfo, SHADDA_BASE, SHADDA_ISOLATED,
    SHADDA_TATWEEL, SHAPE_TABLE, SPACE, TASHKEEL_FORM_OFFSET, TASHKEEL_PLACEHOLDER, TATWEEL,
    YEH_HAMZA, link_of,
};
use crate::options::TextDirection;

/// How tashkeel marks are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TashkeelRule {
    /// Always the isolated form.
    Isolated,
    /// Medial form between two joining letters.
    Contextual,
    /// Removed, leaving a placeholder; Shadda stays.
    Remove,
}

/// What the shaping pass produced that later stages must resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Found {
    pub lam_alef: bool,
    pub tashkeel: bool,
    pub seen: bool,
    pub yeh_hamza: bool,
}

// ---------------------------------------------------------------------------
// Shaping
// ---------------------------------------------------------------------------

/// Map presentation forms back to the Arabic block so shaping starts from
/// base letters. LamAlef forms become their ligature stand-ins.
pub(crate) fn normalize_presentation(buf: &mut [char]) {
    for c in buf.iter_mut() {
        if let Some(base) = link::base_of(*c) {
            *c = base;
        }
    }
}

/// Select contextual forms in place.
pub(crate) fn shape_letters(buf: &mut [char], rule: TashkeelRule) -> Found {
    let links: Vec<LinkInfo> = buf.iter().map(|&c| link_of(c)).collect();
    let next_links = nearest_relevant_left(&links);

    let mut found = Found::default();
    let mut prev = LinkInfo::NONE;
    let mut last = LinkInfo::NONE;
    let mut last_pos = 0usize;

    for i in (0..buf.len()).rev() {
        let mut curr = links[i];
        let mut pos = i;

        if curr.is_shapeable() {
            let next = next_links[i];
            let mut c = buf[i];

            if curr.is_alef() && last.is_lam() {
                let stand_in = link::lam_alef_stand_in(c);
                if let Some(lig) = stand_in {
                    buf[i] = LAMALEF_PLACEHOLDER;
                    buf[last_pos] = lig;
                    pos = last_pos;
                    c = lig;
                }
                found.lam_alef = true;
                last = prev;
                curr = stand_in.map_or(LinkInfo::NONE, link_of);
            }

            if pos == 0 || buf[pos - 1] == SPACE {
                if link::is_seen_family(c) {
                    found.seen = true;
                } else if c == YEH_HAMZA {
                    found.yeh_hamza = true;
                }
            }

            let mut shape = u32::from(SHAPE_TABLE[next.joins()][last.joins()][curr.joins()]);
            if curr.joins() == 1 {
                shape &= 1;
            } else if link::is_tashkeel(c) {
                shape = tashkeel_shape(c, last, next, rule);
            }

            if (c as u32) & 0xFF00 == 0x0600 {
                if link::is_tashkeel(c) {
                    if rule == TashkeelRule::Remove && c != SHADDA_BASE {
                        buf[pos] = TASHKEEL_PLACEHOLDER;
                        found.tashkeel = true;
                    } else {
                        let offset = TASHKEEL_FORM_OFFSET[(c as u32 - 0x064B) as usize];
                        buf[pos] = link::form(0xFE70, offset + shape, c);
                    }
                } else if curr.in_presentation_a() {
                    buf[pos] = link::form(0xFB50, curr.offset() + shape, c);
                } else if curr.offset() > 0 && !curr.is_irrelevant() {
                    buf[pos] = link::form(0xFE70, curr.offset() + shape, c);
                }
            }
        }

        if !curr.is_irrelevant() {
            prev = last;
            last = curr;
            last_pos = pos;
        }
    }
    found
}

/// For every position, the link of the closest position to its left that
/// is not transparent, or [`LinkInfo::NONE`].
fn nearest_relevant_left(links: &[LinkInfo]) -> Vec<LinkInfo> {
    let mut nearest = LinkInfo::NONE;
    links
        .iter()
        .map(|&link| {
            let seen = nearest;
            if !link.is_irrelevant() {
                nearest = link;
            }
            seen
        })
        .collect()
}

fn tashkeel_shape(c: char, last: LinkInfo, next: LinkInfo, rule: TashkeelRule) -> u32 {
    match rule {
        TashkeelRule::Contextual
            if last.links_left()
                && next.links_right()
                && !matches!(c, '\u{064C}' | '\u{064D}') =>
        {
            u32::from(!(next.is_alef() && last.is_lam()))
        }
        TashkeelRule::Remove if c == SHADDA_BASE => 1,
        _ => 0,
    }
}

/// Tashkeel on tatweel becomes tatweel; isolated tashkeel becomes a space.
/// Isolated Shadda stays.
pub(crate) fn replace_tashkeel_with_tatweel(buf: &mut [char]) {
    for c in buf.iter_mut() {
        match link::tashkeel_on_tatweel(*c) {
            1 => *c = TATWEEL,
            2 => *c = SHADDA_TATWEEL,
            _ if link::is_isolated_tashkeel(*c) && *c != SHADDA_ISOLATED => *c = SPACE,
            _ => {}
        }
    }
}

/// Fold each Shadda + vowel pair into its single ligature form, in reading
/// order for the given direction.
pub(crate) fn aggregate_tashkeel(buf: &mut Vec<char>, direction: TextDirection) {
    if direction == TextDirection::VisualLtr {
        buf.reverse();
    }
    let mut out = 0usize;
    let mut prev_link = LinkInfo::NONE;
    for read in 0..buf.len() {
        let c = buf[read];
        let curr = link_of(c);
        if out > 0 && prev_link.combines_with(curr) {
            let held = buf[out - 1];
            let low = held.min(c) as u32;
            let merged = link::form(0xFC5E, low - 0x064C, held);
            buf[out - 1] = merged;
            prev_link = link_of(merged);
            continue;
        }
        buf[out] = c;
        out += 1;
        prev_link = curr;
    }
    buf.truncate(out);
    if direction == TextDirection::VisualLtr {
        buf.reverse();
    }
}

// ---------------------------------------------------------------------------
// Deshaping
// ---------------------------------------------------------------------------

/// Map presentation forms back to base letters. LamAlef ligatures are left
/// for expansion; returns whether any were seen.
pub(crate) fn deshape_letters(buf: &mut [char], compose_yeh_hamza: bool, compose_seen: bool) -> bool {
    let mut lam_alef = false;
    let mut i = 0;
    while i < buf.len() {
        let c = buf[i];
        let after = buf.get(i + 1).copied();
        match c as u32 {
            0xFB50..=0xFBFF => {
                if let Some(base) = link::base_of(c) {
                    buf[i] = base;
                }
            }
            _ if compose_yeh_hamza
                && (c == HAMZA_BASE || c == HAMZA_ISOLATED)
                && after.is_some_and(link::is_alef_maksoura) =>
            {
                buf[i] = SPACE;
                buf[i + 1] = YEH_HAMZA;
                i += 1;
            }
            _ if compose_seen && link::is_tail(c) && after.is_some_and(link::is_seen_tail_family) => {
                buf[i] = SPACE;
            }
            0xFE70..=0xFEF4 => {
                if let Some(base) = link::base_of(c) {
                    buf[i] = base;
                }
            }
            _ => {}
        }
        if link::is_lam_alef(c) {
            lam_alef = true;
        }
        i += 1;
    }
    lam_alef
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn lone_letters_take_isolated_forms() {
        let mut buf = chars("\u{0628}");
        shape_letters(&mut buf, TashkeelRule::Contextual);
        assert_eq!(buf, ['\u{FE8F}']);
    }

    #[test]
    fn visual_pair_joins() {
        // Visual order: Meem on the left, Beh on the right, so Beh comes
        // first logically and joins forward.
        let mut buf = chars("\u{0645}\u{0628}");
        shape_letters(&mut buf, TashkeelRule::Contextual);
        assert_eq!(buf, ['\u{FEE2}', '\u{FE91}']);
    }

    #[test]
    fn lam_alef_leaves_placeholder() {
        // Visual order: Alef left of Lam.
        let mut buf = chars("\u{0627}\u{0644}");
        let found = shape_letters(&mut buf, TashkeelRule::Contextual);
        assert!(found.lam_alef);
        assert_eq!(buf, [LAMALEF_PLACEHOLDER, '\u{FEFB}']);
    }

    #[test]
    fn joined_lam_alef_uses_final_form() {
        // Visual "Meem, Alef, Lam, Seen": logically Seen Lam Alef Meem.
        let mut buf = chars("\u{0645}\u{0627}\u{0644}\u{0633}");
        shape_letters(&mut buf, TashkeelRule::Contextual);
        assert_eq!(buf, ['\u{FEE1}', LAMALEF_PLACEHOLDER, '\u{FEFC}', '\u{FEB3}']);
    }

    #[test]
    fn marks_do_not_break_joins() {
        // Beh, Fatha, Beh in visual order.
        let mut buf = chars("\u{0628}\u{064E}\u{0628}");
        shape_letters(&mut buf, TashkeelRule::Contextual);
        assert_eq!(buf[0], '\u{FE90}');
        assert_eq!(buf[1], '\u{FE77}');
        assert_eq!(buf[2], '\u{FE91}');
    }

    #[test]
    fn isolated_rule_keeps_marks_isolated() {
        let mut buf = chars("\u{0628}\u{064E}\u{0628}");
        shape_letters(&mut buf, TashkeelRule::Isolated);
        assert_eq!(buf[1], '\u{FE76}');
    }

    #[test]
    fn remove_rule_leaves_placeholders() {
        let mut buf = chars("\u{0628}\u{064E}\u{0651}\u{0628}");
        let found = shape_letters(&mut buf, TashkeelRule::Remove);
        assert!(found.tashkeel);
        assert_eq!(buf[1], TASHKEEL_PLACEHOLDER);
        assert_eq!(buf[2], '\u{FE7D}');
    }

    #[test]
    fn seen_before_space_is_flagged() {
        let mut buf = chars(" \u{0633}");
        let found = shape_letters(&mut buf, TashkeelRule::Contextual);
        assert!(found.seen);
        assert!(!found.yeh_hamza);
    }

    #[test]
    fn tatweel_replacement() {
        let mut buf = vec!['\u{FE77}', '\u{FE76}', SHADDA_ISOLATED, '\u{FCF2}', 'a'];
        replace_tashkeel_with_tatweel(&mut buf);
        assert_eq!(buf, [TATWEEL, SPACE, SHADDA_ISOLATED, SHADDA_TATWEEL, 'a']);
    }

    #[test]
    fn aggregation_folds_pairs() {
        let mut buf = chars("\u{0628}\u{0651}\u{064E}\u{0628}");
        aggregate_tashkeel(&mut buf, TextDirection::Logical);
        assert_eq!(buf, ['\u{0628}', '\u{FC60}', '\u{0628}']);

        let mut first = chars("\u{064F}\u{0651}");
        aggregate_tashkeel(&mut first, TextDirection::Logical);
        assert_eq!(first, ['\u{FC61}']);
    }

    #[test]
    fn visual_aggregation_pairs_from_the_right() {
        let mut buf = chars("\u{0651}\u{064E}\u{0651}");
        aggregate_tashkeel(&mut buf, TextDirection::VisualLtr);
        assert_eq!(buf, ['\u{0651}', '\u{FC60}']);
        let mut logical = chars("\u{0651}\u{064E}\u{0651}");
        aggregate_tashkeel(&mut logical, TextDirection::Logical);
        assert_eq!(logical, ['\u{FC60}', '\u{0651}']);
    }

    #[test]
    fn deshape_maps_forms_back() {
        let mut buf = vec!['\u{FEE1}', '\u{FEB3}', '\u{FB51}'];
        let lam_alef = deshape_letters(&mut buf, false, false);
        assert!(!lam_alef);
        assert_eq!(buf, ['\u{0645}', '\u{0633}', '\u{0671}']);
    }

    #[test]
    fn deshape_reports_lam_alef() {
        let mut buf = vec!['\u{FEFB}'];
        assert!(deshape_letters(&mut buf, false, false));
        assert_eq!(buf, ['\u{FEFB}']);
    }

    #[test]
    fn deshape_composes_yeh_hamza_and_seen() {
        let mut buf = vec![HAMZA_ISOLATED, '\u{FEF0}', '\u{200B}', '\u{FEB2}'];
        deshape_letters(&mut buf, true, true);
        assert_eq!(buf, [SPACE, YEH_HAMZA, SPACE, '\u{0633}']);

        let mut plain = vec![HAMZA_ISOLATED, '\u{FEF0}'];
        deshape_letters(&mut plain, false, false);
        assert_eq!(plain, [HAMZA_BASE, '\u{0649}']);
    }
}
