use crate::breakpoint::{Breakpoint, DEFAULT_MOBILE_BREAKPOINT_PX};
use crate::error::MotionError;
use crate::log::{LogLevel, Logger};
use crate::view::View;
use serde::Deserialize;
use serde_json::json;

pub const CONFIG_ELEMENT_SELECTOR: &str = "script#motion-config";

const DEFAULT_NAVBAR_SCROLL_THRESHOLD_PX: f64 = 50.0;
const DEFAULT_CURSOR_TRAIL_MS: f64 = 500.0;
const DEFAULT_CURSOR_HOVER_SCALE: f64 = 1.5;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const DEFAULT_REVEAL_OFFSET_PX: f64 = 30.0;
const DEFAULT_REVEAL_TRANSITION_SECS: f64 = 0.6;
const DEFAULT_FADE_IN_THRESHOLD: f64 = 0.1;
const DEFAULT_PARALLAX_BASE_SPEED: f64 = 0.3;
const DEFAULT_PARALLAX_SPEED_STEP: f64 = 0.1;
const DEFAULT_TYPING_DELAY_MS: u32 = 1_000;
const DEFAULT_TYPING_INTERVAL_MS: u32 = 50;
const DEFAULT_HIGHLIGHT_OFFSET_PX: f64 = 100.0;
const DEFAULT_HIGHLIGHT_DEBOUNCE_MS: u32 = 10;
const DEFAULT_SKILL_TAG_STAGGER_SECS: f64 = 0.05;
const DEFAULT_PROJECT_CARD_STAGGER_SECS: f64 = 0.1;
const DEFAULT_HERO_REVEAL_DELAY_MS: u32 = 300;
const DEFAULT_HERO_REVEAL_STEP_MS: u32 = 100;
const DEFAULT_PLACEHOLDER_MONOGRAM: &str = "PAM";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const SCROLL_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const DURATION_MS_F64_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const HOVER_SCALE_BOUNDS: (f64, f64) = (1.0, 4.0);
const RATIO_BOUNDS: (f64, f64) = (0.0, 1.0);
const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 500.0);
const SECONDS_BOUNDS: (f64, f64) = (0.0, 10.0);
const SPEED_BOUNDS: (f64, f64) = (0.0, 2.0);
const BREAKPOINT_PX_BOUNDS: (f64, f64) = (1.0, 10_000.0);
const DELAY_MS_BOUNDS: (u32, u32) = (0, 60_000);
const INTERVAL_MS_BOUNDS: (u32, u32) = (1, 5_000);
const DEBOUNCE_MS_BOUNDS: (u32, u32) = (0, 1_000);

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    pub navbar_scroll_threshold_px: f64,
    pub cursor_trail_ms: f64,
    pub cursor_hover_scale: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub reveal_offset_px: f64,
    pub reveal_transition_secs: f64,
    pub fade_in_threshold: f64,
    pub parallax_base_speed: f64,
    pub parallax_speed_step: f64,
    pub typing_delay_ms: u32,
    pub typing_interval_ms: u32,
    pub mobile_breakpoint_px: f64,
    pub highlight_offset_px: f64,
    pub highlight_debounce_ms: u32,
    pub skill_tag_stagger_secs: f64,
    pub project_card_stagger_secs: f64,
    pub hero_reveal_delay_ms: u32,
    pub hero_reveal_step_ms: u32,
    pub placeholder_monogram: String,
    pub contact_email: Option<String>,
    pub log_level: LogLevel,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            navbar_scroll_threshold_px: DEFAULT_NAVBAR_SCROLL_THRESHOLD_PX,
            cursor_trail_ms: DEFAULT_CURSOR_TRAIL_MS,
            cursor_hover_scale: DEFAULT_CURSOR_HOVER_SCALE,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_root_margin: DEFAULT_REVEAL_ROOT_MARGIN.to_string(),
            reveal_offset_px: DEFAULT_REVEAL_OFFSET_PX,
            reveal_transition_secs: DEFAULT_REVEAL_TRANSITION_SECS,
            fade_in_threshold: DEFAULT_FADE_IN_THRESHOLD,
            parallax_base_speed: DEFAULT_PARALLAX_BASE_SPEED,
            parallax_speed_step: DEFAULT_PARALLAX_SPEED_STEP,
            typing_delay_ms: DEFAULT_TYPING_DELAY_MS,
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            highlight_offset_px: DEFAULT_HIGHLIGHT_OFFSET_PX,
            highlight_debounce_ms: DEFAULT_HIGHLIGHT_DEBOUNCE_MS,
            skill_tag_stagger_secs: DEFAULT_SKILL_TAG_STAGGER_SECS,
            project_card_stagger_secs: DEFAULT_PROJECT_CARD_STAGGER_SECS,
            hero_reveal_delay_ms: DEFAULT_HERO_REVEAL_DELAY_MS,
            hero_reveal_step_ms: DEFAULT_HERO_REVEAL_STEP_MS,
            placeholder_monogram: DEFAULT_PLACEHOLDER_MONOGRAM.to_string(),
            contact_email: None,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl MotionConfig {
    pub fn from_json(source: &str) -> Result<Self, MotionError> {
        let parsed: Self = serde_json::from_str(source)?;
        Ok(parsed.bounded())
    }

    pub fn from_view(view: &mut impl View) -> Self {
        let Some(element) = view.query_one(CONFIG_ELEMENT_SELECTOR) else {
            return Self::default();
        };

        match Self::from_json(&view.text(element)) {
            Ok(config) => config,
            Err(error) => {
                Logger::new(DEFAULT_LOG_LEVEL).event(
                    LogLevel::Warn,
                    "motion.config_invalid",
                    json!({ "error": error.to_string() }),
                );
                Self::default()
            }
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::new(self.mobile_breakpoint_px)
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }

    fn bounded(self) -> Self {
        Self {
            navbar_scroll_threshold_px: f64_within(
                self.navbar_scroll_threshold_px,
                DEFAULT_NAVBAR_SCROLL_THRESHOLD_PX,
                SCROLL_PX_BOUNDS,
            ),
            cursor_trail_ms: f64_within(
                self.cursor_trail_ms,
                DEFAULT_CURSOR_TRAIL_MS,
                DURATION_MS_F64_BOUNDS,
            ),
            cursor_hover_scale: f64_within(
                self.cursor_hover_scale,
                DEFAULT_CURSOR_HOVER_SCALE,
                HOVER_SCALE_BOUNDS,
            ),
            reveal_threshold: f64_within(self.reveal_threshold, DEFAULT_REVEAL_THRESHOLD, RATIO_BOUNDS),
            reveal_root_margin: root_margin_or(self.reveal_root_margin, DEFAULT_REVEAL_ROOT_MARGIN),
            reveal_offset_px: f64_within(
                self.reveal_offset_px,
                DEFAULT_REVEAL_OFFSET_PX,
                OFFSET_PX_BOUNDS,
            ),
            reveal_transition_secs: f64_within(
                self.reveal_transition_secs,
                DEFAULT_REVEAL_TRANSITION_SECS,
                SECONDS_BOUNDS,
            ),
            fade_in_threshold: f64_within(
                self.fade_in_threshold,
                DEFAULT_FADE_IN_THRESHOLD,
                RATIO_BOUNDS,
            ),
            parallax_base_speed: f64_within(
                self.parallax_base_speed,
                DEFAULT_PARALLAX_BASE_SPEED,
                SPEED_BOUNDS,
            ),
            parallax_speed_step: f64_within(
                self.parallax_speed_step,
                DEFAULT_PARALLAX_SPEED_STEP,
                RATIO_BOUNDS,
            ),
            typing_delay_ms: u32_within(self.typing_delay_ms, DEFAULT_TYPING_DELAY_MS, DELAY_MS_BOUNDS),
            typing_interval_ms: u32_within(
                self.typing_interval_ms,
                DEFAULT_TYPING_INTERVAL_MS,
                INTERVAL_MS_BOUNDS,
            ),
            mobile_breakpoint_px: f64_within(
                self.mobile_breakpoint_px,
                DEFAULT_MOBILE_BREAKPOINT_PX,
                BREAKPOINT_PX_BOUNDS,
            ),
            highlight_offset_px: f64_within(
                self.highlight_offset_px,
                DEFAULT_HIGHLIGHT_OFFSET_PX,
                SCROLL_PX_BOUNDS,
            ),
            highlight_debounce_ms: u32_within(
                self.highlight_debounce_ms,
                DEFAULT_HIGHLIGHT_DEBOUNCE_MS,
                DEBOUNCE_MS_BOUNDS,
            ),
            skill_tag_stagger_secs: f64_within(
                self.skill_tag_stagger_secs,
                DEFAULT_SKILL_TAG_STAGGER_SECS,
                SECONDS_BOUNDS,
            ),
            project_card_stagger_secs: f64_within(
                self.project_card_stagger_secs,
                DEFAULT_PROJECT_CARD_STAGGER_SECS,
                SECONDS_BOUNDS,
            ),
            hero_reveal_delay_ms: u32_within(
                self.hero_reveal_delay_ms,
                DEFAULT_HERO_REVEAL_DELAY_MS,
                DELAY_MS_BOUNDS,
            ),
            hero_reveal_step_ms: u32_within(
                self.hero_reveal_step_ms,
                DEFAULT_HERO_REVEAL_STEP_MS,
                DELAY_MS_BOUNDS,
            ),
            placeholder_monogram: non_empty_or(
                self.placeholder_monogram,
                DEFAULT_PLACEHOLDER_MONOGRAM,
            ),
            contact_email: self
                .contact_email
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            log_level: self.log_level,
        }
    }
}

fn f64_within(value: f64, default: f64, bounds: (f64, f64)) -> f64 {
    Some(value)
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn u32_within(value: u32, default: u32, bounds: (u32, u32)) -> u32 {
    Some(value)
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

/// One to four lengths, each in `px` or `%`.
fn root_margin_or(value: String, default: &str) -> String {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let well_formed = (1..=4).contains(&tokens.len())
        && tokens.iter().all(|token| {
            token
                .strip_suffix("px")
                .or_else(|| token.strip_suffix('%'))
                .is_some_and(|number| !number.is_empty() && number.parse::<f64>().is_ok_and(f64::is_finite))
        });

    if well_formed {
        tokens.join(" ")
    } else {
        default.to_string()
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
