//! Schematic raster of the roadmap card grid.
//!
//! Text is drawn as bars whose length follows the text length, which is
//! enough for the exported image to mirror the on-screen layout.

use roadmap_core::Roadmap;
use roadmap_engine::{scaled_dimension, RasterImage, RasterOptions, RenderError, RenderedView};

const WIDTH: u32 = 960;
const HEADER_HEIGHT: u32 = 120;
const COLUMNS: u32 = 3;
const GAP: u32 = 15;
const CARD_HEIGHT: u32 = 180;
const CHAR_WIDTH: u32 = 7;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const HEADER: [u8; 3] = [248, 249, 250];
const TEXT: [u8; 3] = [33, 37, 41];
const MUTED: [u8; 3] = [108, 117, 125];
const BORDER: [u8; 3] = [222, 226, 230];
const CARD: [u8; 3] = [255, 255, 255];
const CARD_DONE: [u8; 3] = [212, 237, 218];
const BADGE: [u8; 3] = [13, 110, 253];
const SKILL: [u8; 3] = [13, 202, 240];
const DONE: [u8; 3] = [25, 135, 84];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Card {
    title_len: u32,
    description_len: u32,
    timeframe_len: u32,
    skill_lens: Vec<u32>,
    completed: bool,
}

/// What the results screen shows at the moment an export is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardGridView {
    title_len: u32,
    description_len: u32,
    cards: Vec<Card>,
}

impl CardGridView {
    pub fn new(roadmap: &Roadmap, completed: &[u32]) -> Self {
        let cards = roadmap
            .steps
            .iter()
            .map(|step| Card {
                title_len: char_len(&step.title),
                description_len: char_len(&step.description),
                timeframe_len: char_len(&step.timeframe),
                skill_lens: step.skills.iter().map(|skill| char_len(skill)).collect(),
                completed: completed.contains(&step.number),
            })
            .collect();
        Self {
            title_len: char_len(&roadmap.title),
            description_len: char_len(&roadmap.description),
            cards,
        }
    }

    fn logical_height(&self) -> u32 {
        let rows = (self.cards.len() as u32).div_ceil(COLUMNS);
        HEADER_HEIGHT + rows * (CARD_HEIGHT + GAP) + GAP
    }

    fn card_width() -> u32 {
        (WIDTH - GAP * (COLUMNS + 1)) / COLUMNS
    }
}

impl RenderedView for CardGridView {
    fn rasterize(&self, options: &RasterOptions) -> Result<RasterImage, RenderError> {
        let scale = options.scale;
        let width = scaled_dimension(WIDTH, scale)?;
        let height = scaled_dimension(self.logical_height(), scale)?;
        let mut canvas = Canvas {
            image: RasterImage::filled(width, height, BACKGROUND)?,
            scale,
        };

        canvas.rect(0, 0, WIDTH, HEADER_HEIGHT, HEADER);
        canvas.rect(GAP, 30, text_width(self.title_len, WIDTH - 2 * GAP), 24, TEXT);
        canvas.rect(
            GAP,
            70,
            text_width(self.description_len, WIDTH - 2 * GAP),
            12,
            MUTED,
        );

        let card_width = Self::card_width();
        for (index, card) in self.cards.iter().enumerate() {
            let column = index as u32 % COLUMNS;
            let row = index as u32 / COLUMNS;
            let x = GAP + column * (card_width + GAP);
            let y = HEADER_HEIGHT + GAP + row * (CARD_HEIGHT + GAP);
            canvas.card(x, y, card_width, card);
        }

        Ok(canvas.image)
    }
}

struct Canvas {
    image: RasterImage,
    scale: f32,
}

impl Canvas {
    fn rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
        let s = |v: u32| (v as f32 * self.scale).round() as u32;
        self.image.fill_rect(s(x), s(y), s(width), s(height), color);
    }

    fn card(&mut self, x: u32, y: u32, width: u32, card: &Card) {
        let inner = width - 24;
        self.rect(x, y, width, CARD_HEIGHT, BORDER);
        let fill = if card.completed { CARD_DONE } else { CARD };
        self.rect(x + 1, y + 1, width - 2, CARD_HEIGHT - 2, fill);

        self.rect(x + 12, y + 12, 28, 28, BADGE);
        self.rect(x + 48, y + 20, text_width(card.title_len, inner - 36), 12, TEXT);
        self.rect(x + 12, y + 52, text_width(card.description_len, inner), 8, MUTED);

        let mut skill_x = x + 12;
        for &len in &card.skill_lens {
            let pill = text_width(len, inner) + 8;
            if skill_x + pill > x + 12 + inner {
                break;
            }
            self.rect(skill_x, y + 80, pill, 14, SKILL);
            skill_x += pill + 6;
        }

        self.rect(x + 12, y + 108, text_width(card.timeframe_len, inner), 10, MUTED);

        let button = if card.completed { DONE } else { BADGE };
        self.rect(x + 12, y + CARD_HEIGHT - 40, inner, 26, button);
    }
}

fn char_len(text: &str) -> u32 {
    text.chars().count().min(u32::MAX as usize) as u32
}

fn text_width(chars: u32, max: u32) -> u32 {
    chars.saturating_mul(CHAR_WIDTH).min(max)
}
