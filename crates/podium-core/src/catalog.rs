//! Static catalog of debate event formats.
//!
//! Each format is an ordered list of timed segments plus the prep budget
//! granted to each side. The catalog is configuration, not runtime state:
//! selecting an event copies a preset into the session.

use serde::{Deserialize, Serialize};

/// Which side a segment (or prep budget) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Aff,
    Neg,
}

/// Segment classification. Drives side attribution and the view's
/// tinting/striping; cross-examination segments without a clear owner
/// (crossfires, question segments) are `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    Aff,
    Neg,
    AffCross,
    NegCross,
    Other,
}

impl SegmentKind {
    /// Side the segment counts toward, if any.
    pub fn side(&self) -> Option<Side> {
        match self {
            SegmentKind::Aff | SegmentKind::AffCross => Some(Side::Aff),
            SegmentKind::Neg | SegmentKind::NegCross => Some(Side::Neg),
            SegmentKind::Other => None,
        }
    }

    /// Cross-examination segments get diagonal striping in the view.
    pub fn is_cross(&self) -> bool {
        matches!(self, SegmentKind::AffCross | SegmentKind::NegCross)
    }
}

/// One named, timed portion of a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub duration_secs: u32,
    pub title: String,
    pub kind: SegmentKind,
    /// Display label for who speaks ("2nd AFF Speaker"). Not every format
    /// assigns speakers.
    #[serde(default)]
    pub speaker: Option<String>,
}

/// A named format: ordered segments plus the per-side prep budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPreset {
    pub name: &'static str,
    pub prep_secs: u32,
    pub segments: Vec<Segment>,
}

impl EventPreset {
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn total_secs(&self) -> u32 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

/// Every format the catalog knows, in menu order.
pub const EVENT_NAMES: [&str; 7] = [
    "Big Questions",
    "Congress",
    "Lincoln Douglas",
    "Parliamentary",
    "Policy",
    "Public Forum",
    "World Schools",
];

fn seg(minutes: u32, title: &str, kind: SegmentKind) -> Segment {
    Segment {
        duration_secs: minutes * 60,
        title: title.into(),
        kind,
        speaker: None,
    }
}

fn seg_by(minutes: u32, title: &str, kind: SegmentKind, speaker: &str) -> Segment {
    Segment {
        duration_secs: minutes * 60,
        title: title.into(),
        kind,
        speaker: Some(speaker.into()),
    }
}

/// Look up a preset by name. Returns `None` for unknown names; the
/// session turns that into a hard error.
pub fn preset(name: &str) -> Option<EventPreset> {
    use SegmentKind::{Aff, AffCross, Neg, NegCross, Other};

    match name {
        "Big Questions" => Some(EventPreset {
            name: "Big Questions",
            prep_secs: 3 * 60,
            segments: vec![
                seg(5, "AFF Constructive", Aff),
                seg(5, "Neg Constructive", Neg),
                seg(3, "Question Segment", Other),
                seg(4, "AFF Rebuttal", Aff),
                seg(4, "NEG Rebuttal", Neg),
                seg(3, "Question Segment", Other),
                seg(3, "AFF Consolidation", Aff),
                seg(3, "NEG Consolidation", Neg),
                seg(2, "AFF Rationale", Aff),
                seg(2, "NEG Rationale", Neg),
            ],
        }),
        "Congress" => Some(EventPreset {
            name: "Congress",
            prep_secs: 0,
            segments: vec![
                seg(3, "Speech", Aff),
                seg(1, "Cross-Examination", Other),
            ],
        }),
        "Lincoln Douglas" => Some(EventPreset {
            name: "Lincoln Douglas",
            prep_secs: 3 * 60,
            segments: vec![
                seg(6, "1AC", Aff),
                seg(3, "CX", AffCross),
                seg(7, "1NC", Neg),
                seg(3, "CX", NegCross),
                seg(4, "1AR", Aff),
                seg(6, "2NR", Neg),
                seg(3, "2AR", Aff),
            ],
        }),
        "Parliamentary" => Some(EventPreset {
            name: "Parliamentary",
            prep_secs: 0,
            segments: vec![
                seg_by(7, "1st AFF Constructive", Aff, "1st AFF Speaker"),
                seg_by(8, "1st NEG Constructive", Neg, "1st NEG Speaker"),
                seg_by(8, "2nd AFF Constructive", Aff, "2nd AFF Speaker"),
                seg_by(8, "2nd NEG Constructive", Neg, "2nd NEG Speaker"),
                seg_by(4, "NEG Rebuttal", Neg, "1st NEG Speaker"),
                seg_by(5, "AFF Rebuttal", Aff, "1st AFF Speaker"),
            ],
        }),
        "Policy" => Some(EventPreset {
            name: "Policy",
            prep_secs: 5 * 60,
            segments: vec![
                seg_by(8, "1AC", Aff, "1st AFF Speaker"),
                seg_by(3, "CX", AffCross, "1st AFF Speaker\n2nd NEG Speaker"),
                seg_by(8, "1NC", Neg, "1st NEG Speaker"),
                seg_by(3, "CX", NegCross, "1st NEG Speaker\n1st AFF Speaker"),
                seg_by(8, "2AC", Aff, "2nd AFF Speaker"),
                seg_by(3, "CX", AffCross, "2nd AFF Speaker\n1st NEG Speaker"),
                seg_by(8, "2NC", Neg, "2nd NEG Speaker"),
                seg_by(3, "CX", NegCross, "2nd NEG Speaker\n2nd AFF Speaker"),
                seg_by(5, "1NR", Neg, "1st NEG Speaker"),
                seg_by(5, "1AR", Aff, "1st AFF Speaker"),
                seg_by(5, "2NR", Neg, "2nd NEG Speaker"),
                seg_by(5, "2AR", Aff, "2nd AFF Speaker"),
            ],
        }),
        "Public Forum" => Some(EventPreset {
            name: "Public Forum",
            prep_secs: 3 * 60,
            segments: vec![
                seg_by(4, "AFF Constructive", Aff, "1st AFF Speaker"),
                seg_by(4, "NEG Constructive", Neg, "1st NEG Speaker"),
                seg_by(3, "1st Crossfire", Other, "1st Speakers"),
                seg_by(4, "AFF Rebuttal", Aff, "2nd AFF Speaker"),
                seg_by(4, "NEG Rebuttal", Neg, "2nd NEG Speaker"),
                seg_by(3, "2nd Crossfire", Other, "2nd Speakers"),
                seg_by(3, "AFF Summary", Aff, "1st AFF Speaker"),
                seg_by(3, "NEG Summary", Neg, "1st NEG Speaker"),
                seg_by(3, "Grand Crossfire", Other, "All Speakers"),
                seg_by(2, "AFF Final Focus", Aff, "2nd AFF Speaker"),
                seg_by(2, "NEG Final Focus", Neg, "2nd NEG Speaker"),
            ],
        }),
        "World Schools" => Some(EventPreset {
            name: "World Schools",
            prep_secs: 0,
            segments: vec![
                seg_by(8, "1st PROP", Aff, "1st Prop Speaker"),
                seg_by(8, "1st OPP", Neg, "1st OPP Speaker"),
                seg_by(8, "2nd PROP", Aff, "2nd PROP Speaker"),
                seg_by(8, "2nd OPP", Neg, "2nd OPP Speaker"),
                seg_by(8, "3rd PROP", Aff, "1st/2nd PROP Speaker"),
                seg_by(8, "3rd OPP", Neg, "1st/2nd OPP Speaker"),
                seg(4, "OPP Reply", Neg),
                seg(4, "PROP Reply", Aff),
            ],
        }),
        _ => None,
    }
}
