//! Terminal and JSON rendering of analytics results.
//!
//! Weights are stored in kg; conversion to the display unit happens only here,
//! and only for the human-readable tables.

use liftlog_core::{
    densify, DateWindow, DisplayUnit, Estimated1RmPoint, IntensityBand, IntensityDistribution,
    Result, TopSetPoint, WeeklyPoint,
};
use serde::Serialize;

pub struct Printer {
    json: bool,
    unit: DisplayUnit,
}

impl Printer {
    pub fn new(json: bool, unit: DisplayUnit) -> Self {
        Self { json, unit }
    }

    pub fn e1rm(&self, name: &str, series: &[Estimated1RmPoint]) -> Result<()> {
        if self.json {
            return print_json(&series);
        }
        if series.is_empty() {
            no_data(name);
            return Ok(());
        }

        header(&format!("{} - estimated 1RM", name));
        for point in series {
            println!("  {}  {}", point.date, self.weight(point.estimated_1rm));
        }
        println!();
        Ok(())
    }

    pub fn top_sets(&self, name: &str, series: &[TopSetPoint]) -> Result<()> {
        if self.json {
            return print_json(&series);
        }
        if series.is_empty() {
            no_data(name);
            return Ok(());
        }

        header(&format!("{} - top sets", name));
        for point in series {
            println!(
                "  {}  {} × {}",
                point.date,
                self.weight(point.set.weight),
                point.set.reps
            );
        }
        println!();
        Ok(())
    }

    /// Weekly series; with `dense`, empty weeks between active ones print as 0
    pub fn weekly<P: WeeklyPoint + Serialize>(
        &self,
        name: &str,
        metric: &str,
        points: &[P],
        window: &DateWindow,
        dense: bool,
        is_weight: bool,
    ) -> Result<()> {
        if self.json {
            return if dense {
                print_json(&densify(points, window))
            } else {
                print_json(&points)
            };
        }
        if points.is_empty() {
            no_data(name);
            return Ok(());
        }

        header(&format!("{} - weekly {}", name, metric));
        let render = |value: f64| {
            if is_weight {
                self.weight(value)
            } else {
                format!("{:.1}", value)
            }
        };

        if dense {
            for week in densify(points, window) {
                println!(
                    "  week {:>2} ({})  {}",
                    week.week_index,
                    week.week_start,
                    render(week.value)
                );
            }
        } else {
            for point in points {
                println!(
                    "  week {:>2} ({})  {}",
                    point.week_index(),
                    window.week_start(point.week_index()),
                    render(point.value())
                );
            }
        }
        println!();
        Ok(())
    }

    pub fn intensity(&self, name: &str, distribution: &IntensityDistribution) -> Result<()> {
        if self.json {
            return print_json(distribution);
        }
        let total = distribution.total();
        if total == 0 {
            no_data(name);
            return Ok(());
        }

        header(&format!("{} - intensity", name));
        for band in IntensityBand::all() {
            let count = distribution.count(*band);
            println!(
                "  {:>7}  {:>4}  ({:.0}%)",
                band.label(),
                count,
                f64::from(count) * 100.0 / f64::from(total)
            );
        }
        println!();
        Ok(())
    }

    /// Volume table; `rows` are already labelled for display
    pub fn volume_map<M: Serialize>(
        &self,
        title: &str,
        map: &M,
        rows: Vec<(String, f64)>,
    ) -> Result<()> {
        if self.json {
            return print_json(map);
        }
        if rows.iter().all(|(_, volume)| *volume == 0.0) {
            println!("No volume recorded in this range.");
            return Ok(());
        }

        header(title);
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, volume) in &rows {
            println!("  {:<width$}  {}", label, self.weight(*volume), width = width);
        }
        println!();
        Ok(())
    }

    fn weight(&self, kg: f64) -> String {
        format!("{:.1} {}", self.unit.convert_kg(kg), self.unit)
    }
}

fn header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
}

fn no_data(name: &str) {
    println!("No data for {} in this range.", name);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
