//! Shared fixtures for report tests

use chrono::NaiveDate;

use crate::models::{Category, Expense, Money, Project};

use super::reference::ReferenceData;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Two projects and three categories with fixed names
pub(crate) struct Fixture {
    pub tower: Project,
    pub depot: Project,
    pub materials: Category,
    pub labour: Category,
    pub transport: Category,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self {
            tower: Project::new("Riverside Tower", Money::from_units(10_000)).with_color("#111"),
            depot: Project::new("Bus Depot", Money::zero()),
            materials: Category::new("Materials").with_color("#f59e0b"),
            labour: Category::new("Labour").with_color("#3b82f6"),
            transport: Category::new("Transport"),
        }
    }

    pub(crate) fn expense(
        &self,
        project: &Project,
        category: &Category,
        units: i64,
        on: NaiveDate,
    ) -> Expense {
        Expense::new(on, project.id, category.id, Money::from_units(units))
    }

    pub(crate) fn reference(&self) -> ReferenceData {
        ReferenceData::new(
            vec![
                self.materials.clone(),
                self.labour.clone(),
                self.transport.clone(),
            ],
            vec![self.tower.clone(), self.depot.clone()],
        )
    }
}
