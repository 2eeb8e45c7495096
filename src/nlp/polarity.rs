//! Lexicon-based polarity scoring in the style of VADER.
//!
//! Each lexicon word carries a valence in roughly [-4, 4]. Valences are
//! adjusted by preceding boosters and negations, dampened before and
//! amplified after a contrastive "but", then summed and squashed into a
//! compound score in [-1, 1].

use std::collections::HashMap;

use super::{NlpError, PolarityScorer, PolarityScores};

const BOOST: f64 = 0.293;
const CAPS_BOOST: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_BOOST: f64 = 0.292;
const QUESTION_BOOST: f64 = 0.18;
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Decay applied to boosters one, two and three words before the sentiment word.
const BOOSTER_DECAY: [f64; 3] = [1.0, 0.95, 0.9];

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("appreciated", 2.3),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("calm", 1.3),
    ("clear", 1.6),
    ("comfortable", 1.5),
    ("confident", 2.2),
    ("cool", 1.3),
    ("easy", 1.9),
    ("encouraging", 2.4),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helped", 1.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("interesting", 1.7),
    ("kind", 2.4),
    ("love", 3.2),
    ("loved", 2.9),
    ("lucky", 1.8),
    ("nice", 1.8),
    ("offer", 0.6),
    ("patient", 1.3),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("polite", 1.7),
    ("positive", 2.6),
    ("proud", 2.1),
    ("recommend", 1.5),
    ("relaxed", 1.8),
    ("relieved", 1.6),
    ("satisfied", 1.8),
    ("selected", 1.1),
    ("smooth", 1.2),
    ("success", 2.7),
    ("successful", 2.8),
    ("successfully", 2.3),
    ("supportive", 1.9),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("welcoming", 2.0),
    ("win", 2.8),
    ("wonderful", 2.7),
    // negative
    ("angry", -2.3),
    ("annoying", -1.8),
    ("anxious", -1.0),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("confused", -1.3),
    ("confusing", -0.9),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disorganized", -1.3),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("frustrated", -2.1),
    ("frustrating", -1.9),
    ("hard", -0.4),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("mistake", -1.5),
    ("negative", -2.7),
    ("nervous", -1.1),
    ("poor", -2.1),
    ("pressure", -1.2),
    ("problem", -1.7),
    ("reject", -1.7),
    ("rejected", -2.3),
    ("rejection", -2.5),
    ("rude", -2.0),
    ("sad", -2.1),
    ("stress", -1.8),
    ("stressful", -1.9),
    ("struggled", -1.4),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("tough", -0.5),
    ("unclear", -1.0),
    ("unfortunately", -1.4),
    ("unhelpful", -1.9),
    ("unprofessional", -1.8),
    ("weak", -1.9),
    ("worried", -1.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "completely", "deeply", "especially", "exceptionally", "extremely", "fully",
    "greatly", "highly", "hugely", "incredibly", "particularly", "quite", "really", "remarkably",
    "so", "super", "thoroughly", "totally", "tremendously", "truly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "marginally", "partly", "scarcely", "slightly",
    "somewhat",
];

/// Apostrophes are stripped during tokenizing, so "wasn't" arrives as "wasnt".
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "cannot",
    "without", "rarely", "seldom", "dont", "didnt", "wasnt", "isnt", "werent", "couldnt",
    "wouldnt", "shouldnt", "cant", "wont",
];

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
}

struct Token {
    lower: String,
    shouting: bool,
}

impl LexiconScorer {
    pub fn new() -> Self {
        LexiconScorer {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    pub fn polarity(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }

        let mixed_case = tokens.iter().any(|t| t.shouting) && tokens.iter().any(|t| !t.shouting);
        let mut valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| self.valence_at(&tokens, i, token, mixed_case))
            .collect();

        if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < pivot {
                    *v *= 0.5;
                } else if i > pivot {
                    *v *= 1.5;
                }
            }
        }

        let emphasis = punctuation_emphasis(text);
        let sum: f64 = valences.iter().sum();
        let compound = if sum == 0.0 {
            0.0
        } else {
            normalize(sum + emphasis.copysign(sum))
        };

        let (mut pos_sum, mut neg_sum, mut neu_count) = (0.0f64, 0.0f64, 0.0f64);
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }
        let total = pos_sum + neg_sum.abs() + neu_count;

        PolarityScores {
            neg: round_to(neg_sum.abs() / total, 3),
            neu: round_to(neu_count / total, 3),
            pos: round_to(pos_sum / total, 3),
            compound: round_to(compound, 4),
        }
    }

    fn valence_at(&self, tokens: &[Token], i: usize, token: &Token, mixed_case: bool) -> f64 {
        let Some(&base) = self.lexicon.get(token.lower.as_str()) else {
            return 0.0;
        };
        let mut valence = base;
        if token.shouting && mixed_case {
            valence += CAPS_BOOST.copysign(valence);
        }

        for (distance, decay) in (1..=3).zip(BOOSTER_DECAY) {
            let Some(prev) = i.checked_sub(distance).map(|p| &tokens[p]) else {
                break;
            };
            valence += booster(&prev.lower) * valence.signum() * decay;
        }

        for distance in 1..=3 {
            let Some(prev) = i.checked_sub(distance).map(|p| &tokens[p]) else {
                break;
            };
            if NEGATIONS.contains(&prev.lower.as_str()) {
                valence *= NEGATION_SCALAR;
            }
        }

        valence
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<PolarityScores, NlpError> {
        Ok(self.polarity(text))
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let word: String = raw
                .trim_matches(|c: char| !c.is_alphanumeric())
                .chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .collect();
            if word.is_empty() {
                return None;
            }
            let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
            let shouting = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
            Some(Token {
                lower: word.to_lowercase(),
                shouting,
            })
        })
        .collect()
}

/// Signed boost contributed by a booster word, or 0.0.
fn booster(word: &str) -> f64 {
    if BOOSTERS_UP.contains(&word) {
        BOOST
    } else if BOOSTERS_DOWN.contains(&word) {
        -BOOST
    } else {
        0.0
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_boost = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_BOOST,
        _ => 0.96,
    };
    exclamations * EXCLAMATION_BOOST + question_boost
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        LexiconScorer::new().polarity(text).compound
    }

    #[test]
    fn positive_text_scores_positive() {
        assert!(compound("The interviewers were friendly and the process was smooth.") > 0.5);
    }

    #[test]
    fn negative_text_scores_negative() {
        assert!(compound("The HR was rude and the whole thing was terrible.") < -0.5);
    }

    #[test]
    fn text_without_lexicon_words_is_zero() {
        let scores = LexiconScorer::new().polarity("Round 1 had two DSA questions on arrays.");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(compound("The interviewer was good.") > 0.0);
        assert!(compound("The interviewer was not good.") < 0.0);
        assert!(compound("The interviewer wasn't good.") < 0.0);
    }

    #[test]
    fn boosters_increase_intensity() {
        assert!(compound("It was very good.") > compound("It was good."));
        assert!(compound("It was slightly good.") < compound("It was good."));
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert!(compound("The questions were hard but the panel was great.") > 0.0);
    }

    #[test]
    fn exclamations_add_emphasis() {
        assert!(compound("It was good!!!") > compound("It was good."));
    }

    #[test]
    fn compound_stays_in_range_and_rounded() {
        let text = "great great great great great excellent amazing best perfect wonderful";
        let c = compound(text);
        assert!(c <= 1.0 && c > 0.9);
        assert_eq!(c, round_to(c, 4));
    }

    #[test]
    fn proportions_sum_to_one() {
        let s = LexiconScorer::new().polarity("Good panel, bad timing, long day.");
        let total = s.neg + s.neu + s.pos;
        assert!((total - 1.0).abs() < 0.01, "total was {total}");
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(LexiconScorer::new().polarity("").compound, 0.0);
    }
}
