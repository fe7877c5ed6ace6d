//! Skill doughnut charts.
//!
//! Configurations serialize to the schema Chart.js expects; the label
//! callback is attached separately because it has to be a JS function.

use serde::Serialize;

const BORDER_WIDTH: u32 = 2;
const BORDER_COLOR: &str = "#021c3b";
const CUTOUT: &str = "60%";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub label: &'static str,
    pub percent: u8,
    pub color: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillChart {
    pub canvas_id: &'static str,
    pub skills: &'static [Skill],
}

pub const SOFT_SKILLS: SkillChart = SkillChart {
    canvas_id: "softSkillChart",
    skills: &[
        Skill { label: "Teamwork", percent: 85, color: "#1E90FF" },
        Skill { label: "Communication", percent: 90, color: "#00C851" },
        Skill { label: "Problem Solving", percent: 80, color: "#FFBB33" },
        Skill { label: "Time Management", percent: 75, color: "#CC33FF" },
    ],
};

pub const HARD_SKILLS: SkillChart = SkillChart {
    canvas_id: "hardSkillChart",
    skills: &[
        Skill { label: "HTML/CSS", percent: 90, color: "#FFBB33" },
        Skill { label: "JavaScript", percent: 85, color: "#1E90FF" },
        Skill { label: "Laravel", percent: 75, color: "#FF6699" },
        Skill { label: "MySQL", percent: 80, color: "#00C851" },
    ],
};

pub const SKILL_CHARTS: [SkillChart; 2] = [SOFT_SKILLS, HARD_SKILLS];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<u8>,
    pub background_color: Vec<&'static str>,
    pub border_width: u32,
    pub border_color: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    pub cutout: &'static str,
    pub plugins: Plugins,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Toggle,
    pub tooltip: TooltipOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub enabled: bool,
}

impl SkillChart {
    pub fn config(&self) -> ChartConfig {
        ChartConfig {
            kind: "doughnut",
            data: ChartData {
                labels: self.skills.iter().map(|skill| skill.label).collect(),
                datasets: vec![Dataset {
                    data: self.skills.iter().map(|skill| skill.percent).collect(),
                    background_color: self.skills.iter().map(|skill| skill.color).collect(),
                    border_width: BORDER_WIDTH,
                    border_color: BORDER_COLOR,
                }],
            },
            options: ChartOptions {
                cutout: CUTOUT,
                plugins: Plugins {
                    legend: Toggle { display: false },
                    tooltip: TooltipOptions { enabled: false },
                },
            },
        }
    }
}

pub fn format_tooltip_label(label: &str, value: f64) -> String {
    format!("{label}: {value}%")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePoint {
    pub dataset_index: usize,
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TooltipAction {
    Show {
        points: Vec<ActivePoint>,
        x: f64,
        y: f64,
    },
    Clear,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipClick {
    /// Set only on the click that switched tooltips on.
    pub newly_enabled: bool,
    pub action: TooltipAction,
}

/// Click-to-reveal tooltips: disabled until the first click, then every
/// click shows the point under the cursor or clears the tooltip.
#[derive(Clone, Debug, Default)]
pub struct TooltipController {
    enabled: bool,
    active: Vec<ActivePoint>,
}

impl TooltipController {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn active(&self) -> &[ActivePoint] {
        &self.active
    }

    /// `hits` are the points the chart resolved under the click at `(x, y)`.
    pub fn on_click(&mut self, hits: Vec<ActivePoint>, x: f64, y: f64) -> TooltipClick {
        let newly_enabled = !self.enabled;
        self.enabled = true;
        self.active = hits.clone();

        let action = if hits.is_empty() {
            TooltipAction::Clear
        } else {
            TooltipAction::Show { points: hits, x, y }
        };

        TooltipClick {
            newly_enabled,
            action,
        }
    }
}
