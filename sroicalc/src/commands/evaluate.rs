use serde::Serialize;
use sroi_engine::{Valuation, io::Project};

// The valuation, tagged with the project it belongs to
#[derive(Serialize)]
pub struct Evaluation<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub valuation: Valuation,
}

impl<'a> Evaluation<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            name: &project.name,
            valuation: project.evaluate(),
        }
    }
}
