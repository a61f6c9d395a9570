// Command-line calculator
//
// Usage:
//   cargo run --bin select -- <load_amps> <ambient_c>
//   cargo run --bin select            (prompts for ambient, then load)

use anyhow::{Context, Result};
use component_selector::{labels, ComponentClass, SelectionInput, SelectionReport};
use std::io::{self, BufRead, Write};

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let line = lines
        .next()
        .context("Unexpected end of input")?
        .context("Failed to read from stdin")?;
    Ok(line)
}

fn read_input() -> Result<SelectionInput> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (load, ambient) = match args.as_slice() {
        [load, ambient] => (load.clone(), ambient.clone()),
        [] => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            let ambient = prompt(&mut lines, "Enter the ambient temperature (°C): ")?;
            let load = prompt(&mut lines, "Enter the load current (A): ")?;
            (load, ambient)
        }
        _ => anyhow::bail!("Usage: select <load_amps> <ambient_c>"),
    };

    Ok(SelectionInput::from_fields(Some(&load), Some(&ambient))?)
}

/// Lines printed for one selection
fn summary_lines(report: &SelectionReport) -> Vec<String> {
    let mut lines = vec![format!("Minimum Cable Ampacity (MCA): {:.2} A", report.mca)];
    for class in ComponentClass::ALL {
        lines.push(format!("{}: {}", class, labels::or_not_found(report.label(class))));
    }

    let range = report.mms_range.as_ref().map(labels::mms_range_label);
    lines.push(format!("MMS range: {}", labels::or_not_found(range)));
    lines
}

fn main() -> Result<()> {
    let input = read_input()?;
    for line in summary_lines(&SelectionReport::compute(input)) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(&SelectionReport::compute(SelectionInput::new(20.0, 30.0)));
        assert_eq!(lines[0], "Minimum Cable Ampacity (MCA): 30.49 A");
        assert_eq!(lines[1], "Cable: 10 AWG (40A)");
        assert_eq!(lines[4], "VFD: 26A, 11kW");
        assert_eq!(lines[6], "MMS range: 16 - 20");
    }

    #[test]
    fn test_summary_not_found() {
        let lines = summary_lines(&SelectionReport::compute(SelectionInput::new(100.0, 55.0)));
        assert_eq!(lines[2], "Contactor: N/A");
        assert_eq!(lines[6], "MMS range: N/A");
    }
}
