#![forbid(unsafe_code)]

//! Static property data compiled into the crate.
//!
//! Ranges are sorted by start code point and never overlap, so lookups use
//! `partition_point`.

use crate::props::JoiningGroup::{self, *};
use crate::props::JoiningType;

const D: JoiningType = JoiningType::DualJoining;
const C: JoiningType = JoiningType::JoinCausing;
const R: JoiningType = JoiningType::RightJoining;
const T: JoiningType = JoiningType::Transparent;
const U: JoiningType = JoiningType::NonJoining;

/// Bidi_Mirroring_Glyph pairs. Each pair is listed once; the table builder
/// inserts both directions.
pub(crate) static MIRROR_PAIRS: &[(char, char)] = &[
    ('\u{0028}', '\u{0029}'),
    ('\u{003C}', '\u{003E}'),
    ('\u{005B}', '\u{005D}'),
    ('\u{007B}', '\u{007D}'),
    ('\u{00AB}', '\u{00BB}'),
    ('\u{0F3A}', '\u{0F3B}'),
    ('\u{0F3C}', '\u{0F3D}'),
    ('\u{169B}', '\u{169C}'),
    ('\u{2039}', '\u{203A}'),
    ('\u{2045}', '\u{2046}'),
    ('\u{207D}', '\u{207E}'),
    ('\u{208D}', '\u{208E}'),
    ('\u{2208}', '\u{220B}'),
    ('\u{2209}', '\u{220C}'),
    ('\u{220A}', '\u{220D}'),
    ('\u{2215}', '\u{29F5}'),
    ('\u{223C}', '\u{223D}'),
    ('\u{2243}', '\u{22CD}'),
    ('\u{2252}', '\u{2253}'),
    ('\u{2254}', '\u{2255}'),
    ('\u{2264}', '\u{2265}'),
    ('\u{2266}', '\u{2267}'),
    ('\u{2268}', '\u{2269}'),
    ('\u{226A}', '\u{226B}'),
    ('\u{226E}', '\u{226F}'),
    ('\u{2270}', '\u{2271}'),
    ('\u{2272}', '\u{2273}'),
    ('\u{2274}', '\u{2275}'),
    ('\u{2276}', '\u{2277}'),
    ('\u{2278}', '\u{2279}'),
    ('\u{227A}', '\u{227B}'),
    ('\u{227C}', '\u{227D}'),
    ('\u{227E}', '\u{227F}'),
    ('\u{2280}', '\u{2281}'),
    ('\u{2282}', '\u{2283}'),
    ('\u{2284}', '\u{2285}'),
    ('\u{2286}', '\u{2287}'),
    ('\u{2288}', '\u{2289}'),
    ('\u{228A}', '\u{228B}'),
    ('\u{228F}', '\u{2290}'),
    ('\u{2291}', '\u{2292}'),
    ('\u{2298}', '\u{29B8}'),
    ('\u{22A2}', '\u{22A3}'),
    ('\u{22A6}', '\u{2ADE}'),
    ('\u{22A8}', '\u{2AE4}'),
    ('\u{22A9}', '\u{2AE3}'),
    ('\u{22AB}', '\u{2AE5}'),
    ('\u{22B0}', '\u{22B1}'),
    ('\u{22B2}', '\u{22B3}'),
    ('\u{22B4}', '\u{22B5}'),
    ('\u{22B6}', '\u{22B7}'),
    ('\u{22C9}', '\u{22CA}'),
    ('\u{22CB}', '\u{22CC}'),
    ('\u{22D0}', '\u{22D1}'),
    ('\u{22D6}', '\u{22D7}'),
    ('\u{22D8}', '\u{22D9}'),
    ('\u{22DA}', '\u{22DB}'),
    ('\u{22DC}', '\u{22DD}'),
    ('\u{22DE}', '\u{22DF}'),
    ('\u{22E0}', '\u{22E1}'),
    ('\u{22E2}', '\u{22E3}'),
    ('\u{22E4}', '\u{22E5}'),
    ('\u{22E6}', '\u{22E7}'),
    ('\u{22E8}', '\u{22E9}'),
    ('\u{22EA}', '\u{22EB}'),
    ('\u{22EC}', '\u{22ED}'),
    ('\u{22F0}', '\u{22F1}'),
    ('\u{22F2}', '\u{22FA}'),
    ('\u{22F3}', '\u{22FB}'),
    ('\u{22F4}', '\u{22FC}'),
    ('\u{22F6}', '\u{22FD}'),
    ('\u{22F7}', '\u{22FE}'),
    ('\u{2308}', '\u{2309}'),
    ('\u{230A}', '\u{230B}'),
    ('\u{2329}', '\u{232A}'),
    ('\u{2768}', '\u{2769}'),
    ('\u{276A}', '\u{276B}'),
    ('\u{276C}', '\u{276D}'),
    ('\u{276E}', '\u{276F}'),
    ('\u{2770}', '\u{2771}'),
    ('\u{2772}', '\u{2773}'),
    ('\u{2774}', '\u{2775}'),
    ('\u{27C3}', '\u{27C4}'),
    ('\u{27C5}', '\u{27C6}'),
    ('\u{27C8}', '\u{27C9}'),
    ('\u{27CB}', '\u{27CD}'),
    ('\u{27D5}', '\u{27D6}'),
    ('\u{27DD}', '\u{27DE}'),
    ('\u{27E2}', '\u{27E3}'),
    ('\u{27E4}', '\u{27E5}'),
    ('\u{27E6}', '\u{27E7}'),
    ('\u{27E8}', '\u{27E9}'),
    ('\u{27EA}', '\u{27EB}'),
    ('\u{27EC}', '\u{27ED}'),
    ('\u{27EE}', '\u{27EF}'),
    ('\u{2983}', '\u{2984}'),
    ('\u{2985}', '\u{2986}'),
    ('\u{2987}', '\u{2988}'),
    ('\u{2989}', '\u{298A}'),
    ('\u{298B}', '\u{298C}'),
    ('\u{298D}', '\u{2990}'),
    ('\u{298E}', '\u{298F}'),
    ('\u{2991}', '\u{2992}'),
    ('\u{2993}', '\u{2994}'),
    ('\u{2995}', '\u{2996}'),
    ('\u{2997}', '\u{2998}'),
    ('\u{29C0}', '\u{29C1}'),
    ('\u{29C4}', '\u{29C5}'),
    ('\u{29CF}', '\u{29D0}'),
    ('\u{29D1}', '\u{29D2}'),
    ('\u{29D4}', '\u{29D5}'),
    ('\u{29D8}', '\u{29D9}'),
    ('\u{29DA}', '\u{29DB}'),
    ('\u{29F8}', '\u{29F9}'),
    ('\u{29FC}', '\u{29FD}'),
    ('\u{2A2B}', '\u{2A2C}'),
    ('\u{2A2D}', '\u{2A2E}'),
    ('\u{2A34}', '\u{2A35}'),
    ('\u{2A3C}', '\u{2A3D}'),
    ('\u{2A64}', '\u{2A65}'),
    ('\u{2A79}', '\u{2A7A}'),
    ('\u{2A7D}', '\u{2A7E}'),
    ('\u{2A7F}', '\u{2A80}'),
    ('\u{2A81}', '\u{2A82}'),
    ('\u{2A83}', '\u{2A84}'),
    ('\u{2A8B}', '\u{2A8C}'),
    ('\u{2A91}', '\u{2A92}'),
    ('\u{2A93}', '\u{2A94}'),
    ('\u{2A95}', '\u{2A96}'),
    ('\u{2A97}', '\u{2A98}'),
    ('\u{2A99}', '\u{2A9A}'),
    ('\u{2A9B}', '\u{2A9C}'),
    ('\u{2AA1}', '\u{2AA2}'),
    ('\u{2AA6}', '\u{2AA7}'),
    ('\u{2AA8}', '\u{2AA9}'),
    ('\u{2AAA}', '\u{2AAB}'),
    ('\u{2AAC}', '\u{2AAD}'),
    ('\u{2AAF}', '\u{2AB0}'),
    ('\u{2AB3}', '\u{2AB4}'),
    ('\u{2ABB}', '\u{2ABC}'),
    ('\u{2ABD}', '\u{2ABE}'),
    ('\u{2ABF}', '\u{2AC0}'),
    ('\u{2AC1}', '\u{2AC2}'),
    ('\u{2AC3}', '\u{2AC4}'),
    ('\u{2AC5}', '\u{2AC6}'),
    ('\u{2ACD}', '\u{2ACE}'),
    ('\u{2ACF}', '\u{2AD0}'),
    ('\u{2AD1}', '\u{2AD2}'),
    ('\u{2AD3}', '\u{2AD4}'),
    ('\u{2AD5}', '\u{2AD6}'),
    ('\u{2AEC}', '\u{2AED}'),
    ('\u{2AF7}', '\u{2AF8}'),
    ('\u{2AF9}', '\u{2AFA}'),
    ('\u{2E02}', '\u{2E03}'),
    ('\u{2E04}', '\u{2E05}'),
    ('\u{2E09}', '\u{2E0A}'),
    ('\u{2E0C}', '\u{2E0D}'),
    ('\u{2E1C}', '\u{2E1D}'),
    ('\u{2E20}', '\u{2E21}'),
    ('\u{2E22}', '\u{2E23}'),
    ('\u{2E24}', '\u{2E25}'),
    ('\u{2E26}', '\u{2E27}'),
    ('\u{2E28}', '\u{2E29}'),
    ('\u{3008}', '\u{3009}'),
    ('\u{300A}', '\u{300B}'),
    ('\u{300C}', '\u{300D}'),
    ('\u{300E}', '\u{300F}'),
    ('\u{3010}', '\u{3011}'),
    ('\u{3014}', '\u{3015}'),
    ('\u{3016}', '\u{3017}'),
    ('\u{3018}', '\u{3019}'),
    ('\u{301A}', '\u{301B}'),
    ('\u{FE59}', '\u{FE5A}'),
    ('\u{FE5B}', '\u{FE5C}'),
    ('\u{FE5D}', '\u{FE5E}'),
    ('\u{FE64}', '\u{FE65}'),
    ('\u{FF08}', '\u{FF09}'),
    ('\u{FF1C}', '\u{FF1E}'),
    ('\u{FF3B}', '\u{FF3D}'),
    ('\u{FF5B}', '\u{FF5D}'),
    ('\u{FF5F}', '\u{FF60}'),
    ('\u{FF62}', '\u{FF63}'),
];

/// Joining_Type ranges for the Arabic blocks and the joiner controls.
pub(crate) static JOINING_TYPES: &[(char, char, JoiningType)] = &[
    ('\u{0600}', '\u{0605}', U),
    ('\u{0608}', '\u{0608}', U),
    ('\u{060B}', '\u{060B}', U),
    ('\u{0610}', '\u{061A}', T),
    ('\u{061C}', '\u{061C}', T),
    ('\u{0620}', '\u{0620}', D),
    ('\u{0621}', '\u{0621}', U),
    ('\u{0622}', '\u{0625}', R),
    ('\u{0626}', '\u{0626}', D),
    ('\u{0627}', '\u{0627}', R),
    ('\u{0628}', '\u{0628}', D),
    ('\u{0629}', '\u{0629}', R),
    ('\u{062A}', '\u{062E}', D),
    ('\u{062F}', '\u{0632}', R),
    ('\u{0633}', '\u{063F}', D),
    ('\u{0640}', '\u{0640}', C),
    ('\u{0641}', '\u{0647}', D),
    ('\u{0648}', '\u{0648}', R),
    ('\u{0649}', '\u{064A}', D),
    ('\u{064B}', '\u{065F}', T),
    ('\u{066E}', '\u{066F}', D),
    ('\u{0670}', '\u{0670}', T),
    ('\u{0671}', '\u{0673}', R),
    ('\u{0674}', '\u{0674}', U),
    ('\u{0675}', '\u{0677}', R),
    ('\u{0678}', '\u{0687}', D),
    ('\u{0688}', '\u{0699}', R),
    ('\u{069A}', '\u{06BF}', D),
    ('\u{06C0}', '\u{06C0}', R),
    ('\u{06C1}', '\u{06C2}', D),
    ('\u{06C3}', '\u{06CB}', R),
    ('\u{06CC}', '\u{06CC}', D),
    ('\u{06CD}', '\u{06CD}', R),
    ('\u{06CE}', '\u{06CE}', D),
    ('\u{06CF}', '\u{06CF}', R),
    ('\u{06D0}', '\u{06D1}', D),
    ('\u{06D2}', '\u{06D3}', R),
    ('\u{06D5}', '\u{06D5}', R),
    ('\u{06D6}', '\u{06DC}', T),
    ('\u{06DF}', '\u{06E4}', T),
    ('\u{06E7}', '\u{06E8}', T),
    ('\u{06EA}', '\u{06ED}', T),
    ('\u{06EE}', '\u{06EF}', R),
    ('\u{06FA}', '\u{06FC}', D),
    ('\u{06FF}', '\u{06FF}', D),
    ('\u{0750}', '\u{0758}', D),
    ('\u{0759}', '\u{075B}', R),
    ('\u{075C}', '\u{076A}', D),
    ('\u{076B}', '\u{076C}', R),
    ('\u{076D}', '\u{0770}', D),
    ('\u{0771}', '\u{0771}', R),
    ('\u{0772}', '\u{0772}', D),
    ('\u{0773}', '\u{0774}', R),
    ('\u{0775}', '\u{0777}', D),
    ('\u{0778}', '\u{0779}', R),
    ('\u{077A}', '\u{077F}', D),
    ('\u{200C}', '\u{200C}', U),
    ('\u{200D}', '\u{200D}', C),
];

/// Joining_Group ranges for the letters the shaper distinguishes.
pub(crate) static JOINING_GROUPS: &[(char, char, JoiningGroup)] = &[
    ('\u{0620}', '\u{0620}', Yeh),
    ('\u{0622}', '\u{0623}', Alef),
    ('\u{0624}', '\u{0624}', Waw),
    ('\u{0625}', '\u{0625}', Alef),
    ('\u{0626}', '\u{0626}', Yeh),
    ('\u{0627}', '\u{0627}', Alef),
    ('\u{0628}', '\u{0628}', Beh),
    ('\u{0629}', '\u{0629}', TehMarbuta),
    ('\u{062A}', '\u{062B}', Beh),
    ('\u{062C}', '\u{062E}', Hah),
    ('\u{062F}', '\u{0630}', Dal),
    ('\u{0631}', '\u{0632}', Reh),
    ('\u{0633}', '\u{0634}', Seen),
    ('\u{0635}', '\u{0636}', Sad),
    ('\u{0637}', '\u{0638}', Tah),
    ('\u{0639}', '\u{063A}', Ain),
    ('\u{063B}', '\u{063C}', Gaf),
    ('\u{063D}', '\u{063F}', FarsiYeh),
    ('\u{0641}', '\u{0641}', Feh),
    ('\u{0642}', '\u{0642}', Qaf),
    ('\u{0643}', '\u{0643}', Kaf),
    ('\u{0644}', '\u{0644}', Lam),
    ('\u{0645}', '\u{0645}', Meem),
    ('\u{0646}', '\u{0646}', Noon),
    ('\u{0647}', '\u{0647}', Heh),
    ('\u{0648}', '\u{0648}', Waw),
    ('\u{0649}', '\u{064A}', Yeh),
    ('\u{0671}', '\u{0673}', Alef),
    ('\u{0675}', '\u{0675}', Alef),
    ('\u{069A}', '\u{069C}', Seen),
];

/// Binary search over a sorted, non-overlapping inclusive range table.
pub(crate) fn lookup_range<V: Copy>(table: &[(char, char, V)], c: char) -> Option<V> {
    let idx = table.partition_point(|&(_, hi, _)| hi < c);
    match table.get(idx) {
        Some(&(lo, hi, value)) if lo <= c && c <= hi => Some(value),
        _ => None,
    }
}
