//! Test helpers for building plan text
//!
//! Produces output shaped like `tofu plan` / `terraform plan` so parser,
//! renderer and command tests don't each carry their own fixtures.

#![cfg(test)]

/// Builder for plan output text
#[derive(Default)]
pub struct PlanTextBuilder {
    blocks: Vec<String>,
    summary: Option<(usize, usize, usize)>,
    outputs: Vec<String>,
}

impl PlanTextBuilder {
    /// Create a new, empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header followed by a resource body
    ///
    /// The body opener uses `symbol` right-aligned in a three-column gutter,
    /// the way the tools print it (`  +`, `-/+`).
    pub fn resource(
        mut self,
        address: &str,
        phrase: &str,
        symbol: &str,
        resource_type: &str,
        resource_name: &str,
    ) -> Self {
        let attr = match symbol {
            "+" => "+",
            "-" => "-",
            _ => "~",
        };

        let block = format!(
            r#"  # {address} {phrase}
{symbol:>3} resource "{resource_type}" "{resource_name}" {{
      {attr} id   = "{resource_name}-id"
      {attr} tags = {{
          {attr} "Name" = "{resource_name}"
        }}
    }}
"#
        );

        self.blocks.push(block);
        self
    }

    /// Add a header with no body under it
    pub fn header_only(mut self, address: &str, phrase: &str) -> Self {
        self.blocks.push(format!("  # {} {}\n", address, phrase));
        self
    }

    /// Add the trailing `Plan:` line
    pub fn summary(mut self, to_add: usize, to_change: usize, to_destroy: usize) -> Self {
        self.summary = Some((to_add, to_change, to_destroy));
        self
    }

    /// Add an output change; multi-line values become continuation lines
    pub fn output(mut self, symbol: &str, name: &str, value: &str) -> Self {
        self.outputs.push(format!("  {} {} = {}\n", symbol, name, value));
        self
    }

    /// Render the plan text
    pub fn build(self) -> String {
        let mut text = String::from("\nTerraform will perform the following actions:\n\n");

        text.push_str(&self.blocks.join("\n"));

        if let Some((to_add, to_change, to_destroy)) = self.summary {
            text.push_str(&format!(
                "\nPlan: {} to add, {} to change, {} to destroy.\n",
                to_add, to_change, to_destroy
            ));
        }

        if !self.outputs.is_empty() {
            text.push_str("\nChanges to Outputs:\n");

            for output in &self.outputs {
                text.push_str(output);
            }
        }

        text
    }
}
