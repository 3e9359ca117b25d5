//! The prompt table: an ordered mapping from image identifier to the
//! natural-language description submitted to the generation server.
//!
//! The built-in table covers the fifty chapter illustrations plus the
//! cover/hero/diagram assets of the book. An external table can be
//! loaded from a JSON array of `{"id": <number|string>, "prompt": <text>}`
//! objects, which keeps the batch driver table-driven and testable.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::id::ImageId;

/// One illustration to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Chapter number or asset tag.
    pub id: ImageId,
    /// Free-text description passed to the text-to-image workflow.
    #[serde(rename = "prompt")]
    pub text: String,
}

/// Ordered collection of prompt entries.
///
/// Iteration order is insertion order; the batch driver processes
/// entries strictly in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTable(pub Vec<PromptEntry>);

/// Errors while loading an external prompt table.
#[derive(Debug, thiserror::Error)]
pub enum PromptTableError {
    /// The table file could not be read.
    #[error("failed to read prompt table: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents were not a valid JSON prompt array.
    #[error("failed to parse prompt table: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PromptTable {
    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PromptEntry> {
        self.0.iter()
    }

    /// Whether the table contains the given identifier.
    pub fn contains(&self, id: &ImageId) -> bool {
        self.0.iter().any(|e| &e.id == id)
    }

    /// Keep only the entries whose id appears in `ids`, preserving
    /// table order. Ids absent from the table are simply not matched;
    /// callers that care should check [`PromptTable::contains`] first.
    pub fn filter(&self, ids: &[ImageId]) -> PromptTable {
        PromptTable(
            self.0
                .iter()
                .filter(|e| ids.contains(&e.id))
                .cloned()
                .collect(),
        )
    }

    /// Parse a table from a reader yielding the JSON array format.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<PromptTable, PromptTableError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a table from a JSON file on disk.
    pub fn load(path: &Path) -> Result<PromptTable, PromptTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// The built-in illustration table for the book: one artistic,
    /// metaphorical prompt per chapter plus the cover and diagram
    /// assets.
    pub fn builtin() -> PromptTable {
        let chapters: [&str; 50] = [
            // Part I: Nature of Attention
            "abstract human silhouette with glowing masks floating away, revealing pure light within, dark ethereal background, cinematic lighting, digital art",
            "human eye reflecting a smaller eye inside, infinite mirror effect, cosmic space background, purple and gold colors, surreal art",
            "figure standing at crossroads with multiple transparent versions looking from different angles, geometric patterns, mystical atmosphere",
            "beam of golden light from eye, narrow and wide simultaneously, particles in the light, dark background with stars, ethereal",
            "iron filings around magnet forming patterns, but magnets are glowing spheres of different emotions, abstract visualization",
            "person transforming into what they observe, gradient metamorphosis, butterfly emerging from caterpillar concept, artistic",
            "eye looking at itself through mirror portal, recursive infinite depth, glowing edges, cosmic purple atmosphere",
            "glowing energy flowing through body chakra points, some bright some dim, energy economy visualization, ethereal body",
            "flowing river of light with slow and fast sections, inertia visualization, golden and blue gradients, abstract motion",
            "compass needle pointing to glowing center point, calibration to zero concept, minimalist cosmic background, gold accents",
            // Part II: Mechanics of Choice
            "figure surrounded by multiple translucent ghost versions of themselves, quantum superposition visualization, ethereal glow",
            "circle of masked advisors around central figure, council of voices, dramatic lighting, theatrical atmosphere",
            "wave function collapsing into single particle, quantum physics art, purple and gold energy, moment of decision",
            "scales balancing with glowing orbs, some orbs fading as others brighten, price of choice visualization",
            "rewinding spiral staircase, figure walking backwards and forwards simultaneously, time manipulation art",
            "infinite feedback loop spiral, ouroboros modern interpretation, glowing neon lines, cyberpunk meets mystical",
            "breaking chain with explosion of light particles, pattern breaking moment, dramatic energy release",
            "new star forming from cosmic dust, attractor creation, gravitational pull visualization, cosmic birth",
            "filter screens with different information streams, some blocked some passing, information diet concept, digital art",
            "anchor made of light embedded in ground, decision anchoring concept, golden glow, stable foundation",
            // Part III: Topography of Consciousness
            "topographical map with glowing contour lines, consciousness territories, aerial view of mind landscape",
            "golden cradle floating in void, point zero concept, ultimate safety visualization, warm light emanating",
            "internal theater with multiple actor versions of self, stage and audience are same person, meta-theatrical",
            "border between waking and dreaming, half realistic half surreal landscape, liminal space art",
            "kaleidoscope of social masks rotating, colorful personality fragments, identity carousel, dynamic motion",
            "eagle eye view from above clouds, strategic overview of life paths below, golden hour lighting",
            "workshop with tools for soul, internal craftsman space, warm workshop lighting, tools made of light",
            "kaleidoscope turning, moment of pattern shift, reality fragments rearranging, colorful geometric",
            "phase transition like ice to water, consciousness state change visualization, crystal structure melting",
            "health symbol combined with consciousness map, vital signs as territory markers, medical meets mystical",
            // Part IV: Toolkit
            "body and glowing spirit image separating and reuniting, duality concept, ethereal separation art",
            "empty chair with ghostly figure conversation, gestalt hot seat technique, dramatic single spotlight",
            "emotion as colorful shape inside transparent body, body-image work visualization, internal anatomy art",
            "old map being redrawn with new lines, imprinting rewrite concept, parchment with glowing new paths",
            "conscious mind handing key to subconscious shadow, trust transfer visualization, yin yang energy",
            "table with chess-like figures representing life elements, constellation placement, strategic arrangement",
            "open book with fairy tale characters emerging, story as diagnostic tool, magical realism art",
            "person in dialogue with their own symptom as entity, conversation with illness, empathetic meeting",
            "person acting as-if already changed, future self overlay on present, potential visualization",
            "embodiment of emotion through movement, psychodrama dance, energy flowing through posed body",
            // Part V: Mastery and Boundaries
            "clear boundary line with warning signs, method limits visualization, protective barrier art",
            "helping hands reaching but stopping at ethical line, where help ends, compassionate restraint",
            "controlled spark between electrodes, provocation as catalyst, dangerous but contained energy",
            "hands cupping protective space around small light, holding space visualization, nurturing energy",
            "crystal clear water with perfect reflections, clean language concept, pristine communication",
            "wall transforming into door, resistance becoming ally, metamorphosis of obstacle, hopeful light",
            "mirror showing past face overlaid on present, transference recognition, temporal ghost effect",
            "ecosystem web with one element changing, ripple effects visible, ecology of change, interconnected",
            "doorway with gentle light, completion and exit, sunset through door, peaceful transition",
            "path continuing into glowing horizon, journey continues concept, endless road of growth, golden light",
        ];

        let extras: [(&str, &str); 3] = [
            (
                "og",
                "book cover focal psychology, eye with concentric circles, purple and gold cosmic theme, title typography, premium design",
            ),
            (
                "hero",
                "abstract consciousness visualization, human silhouette with light rays and layers, psychology art, premium quality",
            ),
            (
                "topology",
                "five concentric rings with golden center, consciousness topology diagram, ethereal glowing circles, cosmic background",
            ),
        ];

        let mut entries: Vec<PromptEntry> = chapters
            .iter()
            .enumerate()
            .map(|(i, text)| PromptEntry {
                id: ImageId::Chapter(i as u32 + 1),
                text: (*text).to_string(),
            })
            .collect();

        entries.extend(extras.iter().map(|(tag, text)| PromptEntry {
            id: ImageId::Tag((*tag).to_string()),
            text: (*text).to_string(),
        }));

        PromptTable(entries)
    }
}

impl<'a> IntoIterator for &'a PromptTable {
    type Item = &'a PromptEntry;
    type IntoIter = std::slice::Iter<'a, PromptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
