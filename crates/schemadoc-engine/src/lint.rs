//! Lint rule engine
//!
//! Each rule inspects the merged schema graph and reports documentation
//! gaps as warnings. Rules are independent and read-only; the engine runs
//! them in a fixed order and concatenates their output.

use schemadoc_core::{
    ColumnCount, LintConfig, LintReport, RequireColumnComment, RequireTableComment, RuleCode,
    Schema, Table, TableId, Target, UnrelatedTable, Warning,
};
use tracing::debug;

/// A lint rule
///
/// Implementors only look at one table at a time; the enabled check and
/// per-rule exclude list are applied by [`Rule::check`].
pub trait Rule {
    /// Stable identifier of the rule
    fn code(&self) -> RuleCode;

    fn enabled(&self) -> bool;

    /// Table names this rule skips
    fn exclude(&self) -> &[String];

    /// Inspect a single table
    fn check_table(&self, schema: &Schema, id: TableId, table: &Table) -> Vec<Warning>;

    fn is_excluded(&self, table: &str) -> bool {
        self.exclude().iter().any(|excluded| excluded == table)
    }

    /// Run the rule over every non-excluded table
    ///
    /// A disabled rule returns nothing without visiting any table.
    fn check(&self, schema: &Schema) -> Vec<Warning> {
        if !self.enabled() {
            return Vec::new();
        }

        schema
            .table_ids()
            .filter(|(_, table)| !self.is_excluded(&table.name))
            .flat_map(|(id, table)| self.check_table(schema, id, table))
            .collect()
    }
}

impl Rule for RequireTableComment {
    fn code(&self) -> RuleCode {
        RuleCode::RequireTableComment
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn exclude(&self) -> &[String] {
        &self.exclude
    }

    fn check_table(&self, _schema: &Schema, _id: TableId, table: &Table) -> Vec<Warning> {
        if !table.comment.is_empty() {
            return Vec::new();
        }

        vec![Warning::new(
            self.code(),
            Target::table(&table.name),
            format!("table `{}` has no comment", table.name),
        )]
    }
}

impl Rule for RequireColumnComment {
    fn code(&self) -> RuleCode {
        RuleCode::RequireColumnComment
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn exclude(&self) -> &[String] {
        &self.exclude
    }

    fn check_table(&self, _schema: &Schema, _id: TableId, table: &Table) -> Vec<Warning> {
        table
            .columns
            .iter()
            .filter(|column| column.comment.is_empty())
            .map(|column| {
                Warning::new(
                    self.code(),
                    Target::column(&table.name, &column.name),
                    format!("column `{}.{}` has no comment", table.name, column.name),
                )
            })
            .collect()
    }
}

impl Rule for UnrelatedTable {
    fn code(&self) -> RuleCode {
        RuleCode::UnrelatedTable
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn exclude(&self) -> &[String] {
        &self.exclude
    }

    fn check_table(&self, schema: &Schema, id: TableId, table: &Table) -> Vec<Warning> {
        if schema.is_related(id) {
            return Vec::new();
        }

        vec![Warning::new(
            self.code(),
            Target::table(&table.name),
            format!("table `{}` is not related to other tables", table.name),
        )]
    }
}

impl Rule for ColumnCount {
    fn code(&self) -> RuleCode {
        RuleCode::ColumnCount
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn exclude(&self) -> &[String] {
        &self.exclude
    }

    fn check_table(&self, _schema: &Schema, _id: TableId, table: &Table) -> Vec<Warning> {
        if table.columns.len() <= self.max {
            return Vec::new();
        }

        vec![Warning::new(
            self.code(),
            Target::table(&table.name),
            format!(
                "table `{}` has too many columns. [{}/{}]",
                table.name,
                table.columns.len(),
                self.max
            ),
        )]
    }
}

/// Runs the configured rules in their fixed order
pub struct LintEngine<'a> {
    rules: Vec<&'a dyn Rule>,
}

impl<'a> LintEngine<'a> {
    /// Build the engine from per-rule settings
    ///
    /// Order: require_table_comment, require_column_comment,
    /// unrelated_table, column_count.
    pub fn from_config(config: &'a LintConfig) -> Self {
        Self {
            rules: vec![
                &config.require_table_comment as &dyn Rule,
                &config.require_column_comment as &dyn Rule,
                &config.unrelated_table as &dyn Rule,
                &config.column_count as &dyn Rule,
            ],
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[&'a dyn Rule] {
        &self.rules
    }

    /// Evaluate every rule and concatenate the warnings
    pub fn check(&self, schema: &Schema) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for rule in &self.rules {
            let found = rule.check(schema);
            debug!(
                rule = %rule.code(),
                enabled = rule.enabled(),
                warnings = found.len(),
                "lint rule evaluated"
            );
            warnings.extend(found);
        }

        warnings
    }

    /// Evaluate every rule into a report
    pub fn report(&self, schema: &Schema) -> LintReport {
        LintReport::from_warnings(&schema.name, schema.tables.len(), self.check(schema))
    }
}

/// Lint a schema with the given settings
pub fn lint(schema: &Schema, config: &LintConfig) -> Vec<Warning> {
    LintEngine::from_config(config).check(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemadoc_core::{Column, Relation};

    fn schema_with(tables: Vec<Table>) -> Schema {
        let mut schema = Schema::new("test");
        for table in tables {
            schema.add_table(table).unwrap();
        }
        schema
    }

    fn columns(n: usize) -> Vec<Column> {
        (0..n)
            .map(|i| Column::new(format!("c{}", i), "text").with_comment("documented"))
            .collect()
    }

    #[test]
    fn disabled_rule_is_silent() {
        let schema = schema_with(vec![Table::new("a")]);
        let rule = RequireTableComment::default();
        assert!(rule.check(&schema).is_empty());
    }

    #[test]
    fn column_count_boundary() {
        let schema = schema_with(vec![
            Table::new("three").with_columns(columns(3)),
            Table::new("four").with_columns(columns(4)),
        ]);
        let rule = ColumnCount {
            enabled: true,
            max: 3,
            exclude: vec![],
        };

        let warnings = rule.check(&schema);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].target, Target::table("four"));
        assert_eq!(warnings[0].message, "table `four` has too many columns. [4/3]");
    }

    #[test]
    fn unrelated_table_ignores_direction() {
        let mut schema = schema_with(vec![
            Table::new("parent").with_columns(columns(1)),
            Table::new("child").with_columns(columns(2)),
            Table::new("island").with_columns(columns(1)),
        ]);
        schema
            .add_relation(Relation::new(TableId(1), vec![1], TableId(0), vec![0]))
            .unwrap();

        let rule = UnrelatedTable {
            enabled: true,
            exclude: vec![],
        };
        let warnings = rule.check(&schema);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].target.table, "island");
    }

    #[test]
    fn exclude_is_per_rule() {
        let schema = schema_with(vec![Table::new("a").with_columns(vec![Column::new("x", "int")])]);
        let config = LintConfig {
            require_table_comment: RequireTableComment {
                enabled: true,
                exclude: vec!["a".to_string()],
            },
            require_column_comment: RequireColumnComment {
                enabled: true,
                exclude: vec![],
            },
            ..LintConfig::default()
        };

        let warnings = lint(&schema, &config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].rule, RuleCode::RequireColumnComment);
        assert_eq!(warnings[0].target.to_string(), "a.x");
    }

    #[test]
    fn engine_order_matches_rule_codes() {
        let config = LintConfig::default();
        let engine = LintEngine::from_config(&config);
        let codes: Vec<RuleCode> = engine.rules().iter().map(|r| r.code()).collect();
        assert_eq!(codes, RuleCode::ALL.to_vec());
    }
}
