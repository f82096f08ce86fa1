use crate::analyzers::REGISTERED_KINDS;
use crate::core::RuleId;
use anyhow::Result;
use colored::*;
use std::io::Write;

pub fn print_rules(writer: &mut dyn Write) -> Result<()> {
    for rule in RuleId::ALL {
        writeln!(
            writer,
            "{}  {:<26} {}",
            rule.code().bold(),
            rule.name(),
            rule.message()
        )?;
    }
    let kinds: Vec<String> = REGISTERED_KINDS.iter().map(|k| k.to_string()).collect();
    writeln!(writer)?;
    writeln!(writer, "Applies to: {}", kinds.join(", "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_rule() {
        let mut buffer = Vec::new();
        print_rules(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        for rule in RuleId::ALL {
            assert!(output.contains(rule.name()));
            assert!(output.contains(rule.message()));
        }
        assert!(output.contains("parenthesized lambda"));
    }
}
