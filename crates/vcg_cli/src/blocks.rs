//! `vcg blocks`: list the registered block types.

use vcg_blocks::{BlockFactory, BlockOptions, BlockRegistry};

use crate::GlobalArgs;

/// Runs the `vcg blocks` command, printing each block type and its
/// parameters to stdout.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let registry = BlockRegistry::with_builtins(BlockOptions::default());
    print!("{}", listing(&registry));
    if !global.quiet {
        eprintln!("   {} block type(s) available", registry.len());
    }
    Ok(0)
}

/// Formats the registry as one header line per type followed by its
/// parameters, in registry order.
fn listing(registry: &BlockRegistry) -> String {
    let mut out = String::new();
    for factory in registry.iter() {
        out.push_str(&describe(factory));
    }
    out
}

fn describe(factory: &dyn BlockFactory) -> String {
    let mut out = format!("{:<12} {}\n", factory.type_id(), factory.description());
    for spec in factory.params() {
        let default = match &spec.default {
            Some(value) => format!("default {value}"),
            None => "required".to_string(),
        };
        out.push_str(&format!(
            "    {:<8} {:<7} {:<14} {}\n",
            spec.name,
            spec.kind.to_string(),
            default,
            spec.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_covers_every_builtin() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let text = listing(&registry);
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' '))
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(
            headers,
            vec!["and", "multiplexer", "nand", "nor", "or", "xnor", "xor"]
        );
    }

    #[test]
    fn multiplexer_params_marked_required() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let mux = registry.get("multiplexer").unwrap();
        let text = describe(mux);
        let inputs = text.lines().find(|l| l.trim_start().starts_with("inputs")).unwrap();
        assert!(inputs.contains("required"), "{inputs}");
        let default = text.lines().find(|l| l.trim_start().starts_with("default")).unwrap();
        assert!(default.contains("default \"Z\""), "{default}");
    }

    #[test]
    fn gate_params_show_defaults() {
        let registry = BlockRegistry::with_builtins(BlockOptions::default());
        let text = describe(registry.get("and").unwrap());
        assert!(text.contains("default 2"), "{text}");
        assert!(text.contains("default 1"), "{text}");
    }
}
