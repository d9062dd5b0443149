use log::warn;

use crate::data::model::{OptionValue, Options};

// ---------------------------------------------------------------------------
// Option keys recognised in the header
// ---------------------------------------------------------------------------

pub const FIGHEIGHT: &str = "figheight";
pub const FIGWIDTH: &str = "figwidth";
pub const TITLE: &str = "title";
pub const XTITLE: &str = "xtitle";
pub const YTITLE: &str = "ytitle";
pub const FONTSIZE: &str = "fontsize";
pub const XFONTSIZE: &str = "xfontsize";
pub const YFONTSIZE: &str = "yfontsize";
pub const XTITLESIZE: &str = "xtitlesize";
pub const YTITLESIZE: &str = "ytitlesize";
pub const LEGENDSIZE: &str = "legendsize";
pub const XMARGIN: &str = "xmargin";
pub const YMARGIN: &str = "ymargin";
pub const XLOGSCALE: &str = "xlogscale";
pub const YLOGSCALE: &str = "ylogscale";
pub const YLIMMIN: &str = "ylimmin";
pub const YLIMMAX: &str = "ylimmax";
pub const YNUMTICKS: &str = "ynumticks";

/// Short spellings accepted for the figure size.
const ALIASES: &[(&str, &str)] = &[("height", FIGHEIGHT), ("width", FIGWIDTH)];

const KNOWN_KEYS: &[&str] = &[
    FIGHEIGHT, FIGWIDTH, TITLE, XTITLE, YTITLE, FONTSIZE, XFONTSIZE, YFONTSIZE, XTITLESIZE,
    YTITLESIZE, LEGENDSIZE, XMARGIN, YMARGIN, XLOGSCALE, YLOGSCALE, YLIMMIN, YLIMMAX, YNUMTICKS,
];

// ---------------------------------------------------------------------------
// ChartConfig – resolved, typed options
// ---------------------------------------------------------------------------

/// Every chart option with its default filled in. Sizes are inches, fonts points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub fig_width: f64,
    pub fig_height: f64,
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub font_size: f64,
    pub x_font_size: f64,
    pub y_font_size: f64,
    pub x_title_size: f64,
    pub y_title_size: f64,
    pub legend_size: f64,
    pub x_margin: f64,
    pub y_margin: f64,
    pub x_log_scale: bool,
    pub y_log_scale: bool,
    pub y_lim_min: f64,
    pub y_lim_max: f64,
    pub y_num_ticks: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig::resolve(&Options::new())
    }
}

impl ChartConfig {
    /// Fill in defaults for every option missing from `options`.
    ///
    /// The tick, axis-title and legend sizes follow `fontsize` unless they are
    /// given explicitly.
    pub fn resolve(options: &Options) -> Self {
        let lookup = Lookup::new(options);

        let font_size = lookup.number(FONTSIZE, 11.0);
        ChartConfig {
            fig_width: lookup.number(FIGWIDTH, 5.0),
            fig_height: lookup.number(FIGHEIGHT, 5.0),
            title: lookup.text(TITLE),
            x_title: lookup.text(XTITLE),
            y_title: lookup.text(YTITLE),
            font_size,
            x_font_size: lookup.number(XFONTSIZE, font_size),
            y_font_size: lookup.number(YFONTSIZE, font_size),
            x_title_size: lookup.number(XTITLESIZE, font_size),
            y_title_size: lookup.number(YTITLESIZE, font_size),
            legend_size: lookup.number(LEGENDSIZE, font_size),
            x_margin: lookup.number(XMARGIN, 0.3),
            y_margin: lookup.number(YMARGIN, 2.0),
            x_log_scale: lookup.boolean(XLOGSCALE, false),
            y_log_scale: lookup.boolean(YLOGSCALE, false),
            y_lim_min: lookup.number(YLIMMIN, 10.0),
            y_lim_max: lookup.number(YLIMMAX, 100.0),
            y_num_ticks: lookup.number(YNUMTICKS, 10.0).round().max(0.0) as usize,
        }
    }

    /// Title size: matplotlib's "large", 1.2 × the base font size.
    pub fn title_size(&self) -> f64 {
        self.font_size * 1.2
    }
}

// ---------------------------------------------------------------------------
// Typed lookup with alias handling
// ---------------------------------------------------------------------------

struct Lookup<'a> {
    options: &'a Options,
}

impl<'a> Lookup<'a> {
    fn new(options: &'a Options) -> Self {
        for (key, _) in options.iter() {
            let aliased = ALIASES.iter().any(|(alias, _)| *alias == key);
            if !aliased && !KNOWN_KEYS.contains(&key) {
                warn!("ignoring unknown option `{key}`");
            }
        }
        Lookup { options }
    }

    /// The canonical key wins over its alias.
    fn get(&self, key: &str) -> Option<&'a OptionValue> {
        self.options.get(key).or_else(|| {
            ALIASES
                .iter()
                .filter(|(_, canonical)| *canonical == key)
                .find_map(|(alias, _)| self.options.get(alias))
        })
    }

    /// Non-finite numbers (`nan`, `inf`) count as the wrong kind.
    fn number(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            None => default,
            Some(value) => value.as_f64().filter(|v| v.is_finite()).unwrap_or_else(|| {
                warn!("option `{key}` expects a finite number, got {value}; using {default}");
                default
            }),
        }
    }

    fn boolean(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                warn!("option `{key}` expects true/false, got {value}; using {default}");
                default
            }),
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(OptionValue::as_label)
    }
}
