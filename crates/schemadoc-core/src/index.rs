//! Column back-references computed from the relation list

use std::collections::HashMap;

use crate::schema::{ColumnId, RelationId, Schema, TableId};

/// Derived view mapping columns to the relations they take part in
///
/// `parent_relations` lists relations where the column is a child
/// (referencing) column; `child_relations` lists relations where it is a
/// parent (referenced) column. Both keep relation-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationIndex {
    parents: HashMap<ColumnId, Vec<RelationId>>,
    children: HashMap<ColumnId, Vec<RelationId>>,
}

impl RelationIndex {
    /// Index every relation of the schema
    pub fn build(schema: &Schema) -> Self {
        let mut index = Self::default();

        for (i, relation) in schema.relations.iter().enumerate() {
            let id = RelationId(i);
            for column in relation.child_column_ids() {
                index.parents.entry(column).or_default().push(id);
            }
            for column in relation.parent_column_ids() {
                index.children.entry(column).or_default().push(id);
            }
        }

        index
    }

    /// Relations in which `column` is a child column
    pub fn parent_relations(&self, column: ColumnId) -> &[RelationId] {
        self.parents.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Relations in which `column` is a parent column
    pub fn child_relations(&self, column: ColumnId) -> &[RelationId] {
        self.children.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent tables referenced from `column`, deduplicated in first-seen order
    pub fn parent_tables(&self, schema: &Schema, column: ColumnId) -> Vec<TableId> {
        dedup(
            self.parent_relations(column)
                .iter()
                .map(|&r| schema.relation(r).parent_table),
        )
    }

    /// Child tables referencing `column`, deduplicated in first-seen order
    pub fn child_tables(&self, schema: &Schema, column: ColumnId) -> Vec<TableId> {
        dedup(
            self.child_relations(column)
                .iter()
                .map(|&r| schema.relation(r).table),
        )
    }
}

fn dedup(tables: impl Iterator<Item = TableId>) -> Vec<TableId> {
    let mut out: Vec<TableId> = Vec::new();
    for table in tables {
        if !out.contains(&table) {
            out.push(table);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, Relation, Table};

    #[test]
    fn index_is_bidirectional() {
        let mut schema = Schema::new("shop");
        let customers = schema
            .add_table(Table::new("customers").with_columns(vec![Column::new("id", "int")]))
            .unwrap();
        let orders = schema
            .add_table(Table::new("orders").with_columns(vec![
                Column::new("id", "int"),
                Column::new("customer_id", "int"),
                Column::new("referrer_id", "int"),
            ]))
            .unwrap();
        schema
            .add_relation(Relation::new(orders, vec![1], customers, vec![0]))
            .unwrap();
        schema
            .add_relation(Relation::new(orders, vec![2], customers, vec![0]))
            .unwrap();

        let index = schema.relation_index();
        let customer_id = ColumnId::new(orders, 1);
        let pk = ColumnId::new(customers, 0);

        assert_eq!(index.parent_relations(customer_id), &[RelationId(0)]);
        assert_eq!(index.child_relations(pk), &[RelationId(0), RelationId(1)]);
        assert!(index.child_relations(customer_id).is_empty());
        assert!(index.parent_relations(ColumnId::new(orders, 0)).is_empty());

        assert_eq!(index.child_tables(&schema, pk), vec![orders]);
        assert_eq!(index.parent_tables(&schema, customer_id), vec![customers]);
    }
}
