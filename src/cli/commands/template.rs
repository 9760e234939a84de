//! `template`: print the embedded defaults.

use serde::Serialize;

use crate::cli::output::CommandOutput;
use crate::infrastructure::config::DEFAULT_TEMPLATE;

#[derive(Debug, Serialize)]
pub struct TemplateOutput {
    pub template: &'static str,
}

impl CommandOutput for TemplateOutput {
    fn to_human(&self) -> String {
        self.template.trim_end().to_string()
    }
}

pub const fn template() -> TemplateOutput {
    TemplateOutput {
        template: DEFAULT_TEMPLATE,
    }
}
