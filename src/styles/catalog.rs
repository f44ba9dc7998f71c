use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    effects::composite::BlendOp,
    effects::primitives::{DotPattern, EMBOSS_KERNEL, FlareRing, StrokePaint},
    foundation::core::{Pos, Rgba8},
    foundation::error::ThumbError,
    styles::recipe::{Effect, Recipe, Step},
};

/// The built-in title styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    /// Red-orange drop shadow, red-to-orange gradient fill, screened inner glow.
    WarmGradient,
    /// Cyan glow, pink/blue alternating stroke, magenta text.
    ElectricNeon,
    /// Blue and magenta shadows under turquoise text.
    DoubleShadow,
    /// Violet stroke with a dotted gold fill.
    PatternOutline,
    /// Pink and cyan glows plus additive lens flares.
    ClickbaitNeon,
    /// Stepped brown depth under beveled gold.
    GoldRelief,
    /// Wine text with highlight/shade offsets and faint vine stripes.
    WineEmboss,
    /// Grey stone with a dark drop and moss edge.
    StoneCarved,
    /// Layered blue halo, gold edge, enamel blue text.
    EnamelBlue,
    /// Iron grey with rust and metallic edges.
    RusticIron,
    /// Red text over a black glow stack with gold bevel.
    GeorgianDepth,
    /// Warm wash, soft engraving shadows, radial gold foil, micro emboss.
    PremiumGold,
}

impl StyleId {
    pub const ALL: [StyleId; 12] = [
        StyleId::WarmGradient,
        StyleId::ElectricNeon,
        StyleId::DoubleShadow,
        StyleId::PatternOutline,
        StyleId::ClickbaitNeon,
        StyleId::GoldRelief,
        StyleId::WineEmboss,
        StyleId::StoneCarved,
        StyleId::EnamelBlue,
        StyleId::RusticIron,
        StyleId::GeorgianDepth,
        StyleId::PremiumGold,
    ];

    /// Styles rendered when nothing is selected.
    pub const DEFAULT_SET: [StyleId; 3] = [
        StyleId::ElectricNeon,
        StyleId::PatternOutline,
        StyleId::ClickbaitNeon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleId::WarmGradient => "warm-gradient",
            StyleId::ElectricNeon => "electric-neon",
            StyleId::DoubleShadow => "double-shadow",
            StyleId::PatternOutline => "pattern-outline",
            StyleId::ClickbaitNeon => "clickbait-neon",
            StyleId::GoldRelief => "gold-relief",
            StyleId::WineEmboss => "wine-emboss",
            StyleId::StoneCarved => "stone-carved",
            StyleId::EnamelBlue => "enamel-blue",
            StyleId::RusticIron => "rustic-iron",
            StyleId::GeorgianDepth => "georgian-depth",
            StyleId::PremiumGold => "premium-gold",
        }
    }

    pub fn recipe(self) -> Recipe {
        let (steps, crisp) = match self {
            StyleId::WarmGradient => (
                vec![
                    Step::over(shadow(rgba(220, 30, 0, 210), (10, 10), 12.0)),
                    Step::over(Effect::Gradient {
                        top: Rgba8::opaque(255, 20, 0),
                        bottom: Rgba8::opaque(255, 140, 0),
                    }),
                    Step::with(
                        shadow(rgba(255, 240, 200, 150), (-5, -5), 4.0),
                        BlendOp::Screen,
                    ),
                ],
                Rgba8::WHITE,
            ),
            StyleId::ElectricNeon => (
                vec![
                    Step::over(Effect::Glow {
                        color: Rgba8::opaque(0, 255, 255),
                        blur: 12.0,
                    }),
                    Step::over(Effect::Outline {
                        paint: StrokePaint::Alternating {
                            even: Rgba8::opaque(255, 20, 147),
                            odd: Rgba8::opaque(30, 144, 255),
                        },
                        radius: 2,
                    }),
                    Step::over(text(Rgba8::opaque(255, 0, 255), (0, 0))),
                ],
                Rgba8::opaque(255, 0, 255),
            ),
            StyleId::DoubleShadow => (
                vec![
                    Step::over(shadow(rgba(0, 100, 255, 200), (12, 12), 10.0)),
                    Step::over(shadow(rgba(255, 0, 128, 220), (5, 5), 4.0)),
                    Step::over(text(rgba(64, 224, 208, 240), (0, 0))),
                ],
                Rgba8::opaque(64, 224, 208),
            ),
            StyleId::PatternOutline => (
                vec![
                    Step::over(Effect::Outline {
                        paint: StrokePaint::Solid(Rgba8::opaque(138, 43, 226)),
                        radius: 2,
                    }),
                    Step::over(Effect::Pattern {
                        color: Rgba8::opaque(255, 215, 0),
                        pattern: DotPattern::default(),
                    }),
                ],
                Rgba8::opaque(255, 215, 0),
            ),
            StyleId::ClickbaitNeon => (
                vec![
                    Step::over(shadow(rgba(255, 0, 255, 150), (0, 0), 8.0)),
                    Step::over(shadow(rgba(0, 255, 255, 120), (3, 3), 16.0)),
                    Step::with(
                        Effect::Flare {
                            rings: vec![
                                FlareRing { radius: 5, alpha: 60 },
                                FlareRing { radius: 15, alpha: 30 },
                                FlareRing { radius: 30, alpha: 10 },
                            ],
                            blur: 5.0,
                        },
                        BlendOp::Add,
                    ),
                ],
                Rgba8::opaque(255, 165, 0),
            ),
            StyleId::GoldRelief => {
                let depth = rgba(94, 38, 18, 150);
                (
                    vec![
                        Step::over(text(depth, (1, 1))),
                        Step::over(text(depth, (2, 2))),
                        Step::over(text(depth, (3, 3))),
                        Step::over(text(rgba(255, 246, 193, 100), (-1, -1))),
                        Step::over(text(rgba(64, 28, 14, 100), (1, 1))),
                        Step::over(text(Rgba8::opaque(207, 181, 59), (0, 0))),
                    ],
                    Rgba8::opaque(207, 181, 59),
                )
            }
            StyleId::WineEmboss => (
                vec![
                    Step::over(text(rgba(45, 25, 6, 150), (2, 2))),
                    Step::over(text(rgba(170, 111, 115, 150), (-2, -2))),
                    Step::over(text(Rgba8::opaque(86, 47, 14), (0, 0))),
                    Step::over(Effect::Stripes {
                        color: rgba(34, 139, 34, 30),
                        spacing: 50,
                        width: 2,
                    }),
                ],
                Rgba8::opaque(86, 47, 14),
            ),
            StyleId::StoneCarved => (
                vec![
                    Step::over(text(rgba(58, 58, 58, 150), (3, 3))),
                    Step::over(text(Rgba8::opaque(169, 169, 169), (0, 0))),
                    Step::over(text(rgba(34, 139, 34, 80), (-1, 0))),
                ],
                Rgba8::opaque(169, 169, 169),
            ),
            StyleId::EnamelBlue => {
                let mut steps: Vec<Step> = (1..=5u8)
                    .rev()
                    .map(|i| {
                        Step::over(shadow(rgba(13, 71, 161, 20 * i), (0, 0), 2.0 * f32::from(i)))
                    })
                    .collect();
                let edge = rgba(207, 181, 59, 200);
                steps.push(Step::over(text(edge, (-1, -1))));
                steps.push(Step::over(text(edge, (1, 1))));
                steps.push(Step::over(text(Rgba8::opaque(13, 71, 161), (0, 0))));
                (steps, Rgba8::opaque(13, 71, 161))
            }
            StyleId::RusticIron => (
                vec![
                    Step::over(text(Rgba8::opaque(112, 128, 144), (0, 0))),
                    Step::over(text(rgba(178, 34, 34, 150), (1, 0))),
                    Step::over(text(rgba(169, 169, 169, 100), (-1, -1))),
                ],
                Rgba8::opaque(112, 128, 144),
            ),
            StyleId::GeorgianDepth => (
                vec![
                    Step::over(shadow(rgba(0, 0, 0, 30), (2, 2), 8.0)),
                    Step::over(shadow(rgba(0, 0, 0, 50), (1, 1), 5.0)),
                    Step::over(shadow(rgba(0, 0, 0, 70), (0, 0), 3.0)),
                    Step::over(text(rgba(207, 181, 59, 150), (1, 1))),
                    Step::over(text(rgba(255, 246, 193, 80), (-1, -1))),
                    Step::over(text(Rgba8::opaque(198, 43, 34), (0, 0))),
                ],
                Rgba8::opaque(198, 43, 34),
            ),
            StyleId::PremiumGold => (
                vec![
                    Step::over(Effect::Tint {
                        color: rgba(245, 240, 230, 60),
                    }),
                    Step::over(shadow(rgba(0, 0, 0, 80), (1, 1), 3.0)),
                    Step::over(shadow(rgba(0, 0, 0, 80), (2, 2), 6.0)),
                    Step::over(Effect::Foil {
                        dark: Rgba8::opaque(150, 130, 0),
                        light: Rgba8::opaque(255, 215, 0),
                    }),
                    Step::over(Effect::Emboss {
                        color: rgba(255, 255, 255, 20),
                        kernel: EMBOSS_KERNEL,
                    }),
                ],
                Rgba8::opaque(255, 215, 0),
            ),
        };

        Recipe {
            name: self.as_str().to_owned(),
            steps,
            crisp,
        }
    }
}

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba8 {
    Rgba8::new(r, g, b, a)
}

fn text(color: Rgba8, (x, y): (i32, i32)) -> Effect {
    Effect::Text {
        color,
        offset: Pos::new(x, y),
    }
}

fn shadow(color: Rgba8, (x, y): (i32, i32), blur: f32) -> Effect {
    Effect::Shadow {
        color,
        offset: Pos::new(x, y),
        blur,
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleId {
    type Err = ThumbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        StyleId::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = StyleId::ALL.iter().map(|id| id.as_str()).collect();
                ThumbError::config(format!(
                    "unknown style \"{s}\" (known: {})",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/styles/catalog.rs"]
mod tests;
