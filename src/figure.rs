use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plot::Series;

/// Axis scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Linear,
    Log,
}

impl Scale {
    fn pgf_mode(&self) -> &'static str {
        match self {
            Scale::Linear => "normal",
            Scale::Log => "log",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scale::Linear => write!(f, "linear"),
            Scale::Log => write!(f, "log"),
        }
    }
}

impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Scale, String> {
        match s {
            "linear" => Ok(Scale::Linear),
            "log" => Ok(Scale::Log),
            s => Err(format!("unknown scale {:?}", s)),
        }
    }
}

/// Report-ready figure definition: named series of (size, time)
/// points plus axis metadata. Drawing is left to the consumer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub caption: Option<String>,
    pub xlabel: String,
    pub ylabel: String,
    pub xscale: Scale,
    pub yscale: Scale,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new<S: AsRef<str>>(title: S, xlabel: S, ylabel: S) -> Figure {
        Figure {
            title: title.as_ref().to_string(),
            caption: None,
            xlabel: xlabel.as_ref().to_string(),
            ylabel: ylabel.as_ref().to_string(),
            xscale: Scale::Linear,
            yscale: Scale::Linear,
            series: vec![],
        }
    }

    pub fn set_scales(&mut self, xscale: Scale, yscale: Scale) -> &mut Figure {
        self.xscale = xscale;
        self.yscale = yscale;
        self
    }

    pub fn set_caption<S: AsRef<str>>(&mut self, caption: S) -> &mut Figure {
        self.caption = Some(caption.as_ref().to_string());
        self
    }

    pub fn add_series(&mut self, series: Series) -> &mut Figure {
        self.series.push(series);
        self
    }

    /// Look up a series by name.
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Plot-ready data in JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LaTeX pgfplots `axis` environment, one `\addplot` per series.
    /// With a caption, the picture is wrapped in a `figure`.
    pub fn to_pgfplots(&self) -> String {
        let mut out = String::new();
        if self.caption.is_some() {
            out.push_str("\\begin{figure}\n");
            out.push_str("\\centering\n");
        }
        out.push_str("\\begin{tikzpicture}\n");
        out.push_str("\t\\begin{axis}[\n");
        out.push_str(&format!("\t\ttitle={{{}}},\n", self.title));
        out.push_str(&format!("\t\txlabel={{{}}},\n", self.xlabel));
        out.push_str(&format!("\t\tylabel={{{}}},\n", self.ylabel));
        out.push_str(&format!("\t\txmode={},\n", self.xscale.pgf_mode()));
        out.push_str(&format!("\t\tymode={},\n", self.yscale.pgf_mode()));
        out.push_str("\t\tlegend pos=north west,\n");
        out.push_str("\t]\n");
        for series in self.series.iter() {
            out.push_str("\t\t\\addplot coordinates {\n");
            for point in series.points.iter() {
                out.push_str(&format!("\t\t\t({}, {:e})\n", point.x, point.y));
            }
            out.push_str("\t\t};\n");
            out.push_str(&format!("\t\t\\addlegendentry{{{}}}\n", series.name));
        }
        out.push_str("\t\\end{axis}\n");
        out.push_str("\\end{tikzpicture}\n");
        if let Some(caption) = &self.caption {
            out.push_str(&format!("\\caption{{{}}}\n", caption));
            out.push_str("\\end{figure}\n");
        }
        out
    }
}
