//! Text rendering of a finished game

use std::fmt::{self, Display, Formatter};

use dilemma_logic::{payoff, Choice, GameReport, PlayerId, Strategy};

/// Width of the longest bar in the score chart
const BAR_WIDTH: u64 = 30;

/// Renders the round table, scores, winners and cooperation rates
pub struct TextReport<'a>(pub &'a GameReport);

impl TextReport<'_> {
    fn column_width(&self) -> usize {
        self.0
            .result
            .players
            .iter()
            .map(|p| p.as_str().chars().count())
            .chain(std::iter::once("Cooperate".len()))
            .max()
            .unwrap_or(0)
            + 2
    }

    fn bar(&self, score: u64) -> String {
        let top = self.0.analysis.top_score;
        let len = if top == 0 { 0 } else { score * BAR_WIDTH / top };
        "█".repeat(len as usize)
    }
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let GameReport { seed, result, analysis } = self.0;
        let width = self.column_width();

        writeln!(f, "Round-by-round choices")?;
        write!(f, "{:>5}  ", "Round")?;
        for player in &result.players {
            write!(f, "{:<width$}", player)?;
        }
        writeln!(f)?;
        for record in &result.history {
            write!(f, "{:>5}  ", record.round + 1)?;
            for player in &result.players {
                match record.choices.get(player) {
                    Some(choice) => write!(f, "{:<width$}", choice)?,
                    None => write!(f, "{:<width$}", "-")?,
                }
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "Final scores")?;
        for player in &result.players {
            let score = result.score(player).unwrap_or(0);
            writeln!(f, "{:<width$}{:>6}  {}", player, score, self.bar(score))?;
        }

        writeln!(f)?;
        let label = if analysis.winners.len() > 1 { "Winners" } else { "Winner" };
        writeln!(f, "{}: {}", label, join(&analysis.winners))?;
        writeln!(f, "Top score: {}", analysis.top_score)?;

        writeln!(f)?;
        writeln!(f, "Cooperation rate")?;
        for (player, rate) in &analysis.cooperation_rates {
            writeln!(f, "{}: {:.1}%", player, rate)?;
        }

        writeln!(f)?;
        writeln!(f, "Seed: {}", seed)
    }
}

fn join(players: &[PlayerId]) -> String {
    players
        .iter()
        .map(PlayerId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strategy catalogue and payoff rules
pub fn catalogue() -> String {
    let mut out = String::from("Strategies\n");
    for s in Strategy::ALL {
        out.push_str(&format!("  {:<18}{:<18}{}\n", s.id(), s.name(), s.describe()));
    }

    out.push_str("\nPayoffs per pairing (you, them)\n");
    for a in [Choice::Cooperate, Choice::Defect] {
        for b in [Choice::Cooperate, Choice::Defect] {
            let (pa, pb) = payoff(a, b);
            out.push_str(&format!("  {:<11}vs {:<11}{} / {}\n", a, b, pa, pb));
        }
    }
    out.push_str("\nWith more than two players every pairing is scored each round.\n");
    out
}
