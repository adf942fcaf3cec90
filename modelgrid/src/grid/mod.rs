//! Read-only listing grids
//!
//! A [`Grid`] is the column set rendered over one page of records. Before
//! first use it is decorated with two synthetic action columns, "edit"
//! and "delete", which are mini-forms targeting the item endpoints and
//! are not part of the underlying model. Decoration is idempotent.

use serde_json::{Map, Value};

use crate::forms::html_escape;
use crate::model::{value_display, AdminModel, FieldSpec};
use crate::urls::UrlBuilder;

/// Synthetic per-row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// GET mini-form linking to the edit endpoint
    Edit,
    /// POST mini-form linking to the delete endpoint
    Delete,
}

impl ActionKind {
    /// Column name (and default label).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// HTTP method of the mini-form.
    #[must_use]
    pub const fn method(self) -> &'static str {
        match self {
            Self::Edit => "GET",
            Self::Delete => "POST",
        }
    }
}

/// One grid column: a model field or a synthetic action.
#[derive(Debug, Clone)]
pub enum GridColumn {
    /// Column backed by a model field
    Field(FieldSpec),
    /// Synthetic action column appended by decoration
    Action(ActionKind),
}

impl GridColumn {
    /// Column name, unique within a grid.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field(spec) => spec.name,
            Self::Action(kind) => kind.name(),
        }
    }
}

/// Column set for one model's listing.
#[derive(Debug, Clone)]
pub struct Grid {
    model_name: &'static str,
    columns: Vec<GridColumn>,
    readonly: bool,
}

impl Grid {
    /// Grid over a model's fields, not yet decorated.
    #[must_use]
    pub fn for_model<M: AdminModel>() -> Self {
        Self {
            model_name: M::model_name(),
            columns: M::fields().into_iter().map(GridColumn::Field).collect(),
            readonly: false,
        }
    }

    /// Model the grid was built for.
    #[must_use]
    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    /// Columns in rendering order.
    #[must_use]
    pub fn columns(&self) -> &[GridColumn] {
        &self.columns
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name() == name)
    }

    /// Grids always render read-only once decorated.
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Append the edit and delete action columns and mark the grid
    /// read-only. Columns that already exist are left alone, so calling
    /// this twice yields exactly one pair.
    pub fn decorate(&mut self) {
        for kind in [ActionKind::Edit, ActionKind::Delete] {
            if !self.has_column(kind.name()) {
                self.columns.push(GridColumn::Action(kind));
            }
        }
        self.readonly = true;
    }

    /// Render the grid over one page of records as an HTML table.
    #[must_use]
    pub fn render<M: AdminModel>(
        &self,
        items: &[M],
        urls: &UrlBuilder,
        translator: &dyn Fn(&str) -> String,
    ) -> String {
        let mut out = String::from("<table class=\"modelgrid-grid\">\n<thead><tr>");
        for column in &self.columns {
            let label = match column {
                GridColumn::Field(spec) => html_escape(spec.label),
                GridColumn::Action(kind) => html_escape(&translator(kind.name())),
            };
            out.push_str(&format!("<th>{label}</th>"));
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for item in items {
            out.push_str("<tr>");
            for column in &self.columns {
                match column {
                    GridColumn::Field(spec) => {
                        let value = item.get(spec.name).unwrap_or(Value::Null);
                        out.push_str(&format!("<td>{}</td>", html_escape(&value_display(&value))));
                    }
                    GridColumn::Action(kind) => {
                        let cell = item.pk().map_or_else(String::new, |pk| {
                            self.action_cell(*kind, urls, &pk.to_string(), translator)
                        });
                        out.push_str(&format!("<td>{cell}</td>"));
                    }
                }
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>");
        out
    }

    /// One record as a JSON row object: primary key, item URL, and
    /// either a flattened field map or a `cell` array in the grid-widget
    /// convention.
    #[must_use]
    pub fn row_json<M: AdminModel>(&self, item: &M, urls: &UrlBuilder, cells: bool) -> Value {
        let pk = item.pk();
        let mut row = Map::new();
        row.insert(
            "id".to_string(),
            pk.as_ref().map_or(Value::Null, |pk| Value::from(pk.to_string())),
        );
        if let Some(pk) = &pk {
            row.insert(
                "item_url".to_string(),
                Value::from(urls.item(self.model_name, pk)),
            );
        }
        if cells {
            let mut cell = Vec::with_capacity(self.columns.len() + 1);
            cell.push(pk.as_ref().map_or(Value::Null, |pk| Value::from(pk.to_string())));
            for column in &self.columns {
                if let GridColumn::Field(spec) = column {
                    let value = item.get(spec.name).unwrap_or(Value::Null);
                    cell.push(Value::from(value_display(&value)));
                }
            }
            row.insert("cell".to_string(), Value::from(cell));
        } else {
            for column in &self.columns {
                if let GridColumn::Field(spec) = column {
                    // The stringly pk under "id" wins over a model field
                    // of the same name.
                    row.entry(spec.name.to_string())
                        .or_insert_with(|| item.get(spec.name).unwrap_or(Value::Null));
                }
            }
        }
        Value::Object(row)
    }

    fn action_cell(
        &self,
        kind: ActionKind,
        urls: &UrlBuilder,
        pk: &str,
        translator: &dyn Fn(&str) -> String,
    ) -> String {
        let label = html_escape(&translator(kind.name()));
        let (url, form_class, input_class) = match kind {
            ActionKind::Edit => (
                urls.item_action(self.model_name, pk, "edit"),
                "ui-grid-icon ui-widget-header ui-corner-all",
                "ui-grid-icon ui-icon ui-icon-pencil",
            ),
            ActionKind::Delete => (
                urls.item_action(self.model_name, pk, "delete"),
                "ui-grid-icon ui-state-error ui-corner-all",
                "ui-icon ui-icon-circle-close",
            ),
        };
        format!(
            "<form action=\"{}\" method=\"{}\" class=\"{form_class}\">\
             <input type=\"submit\" class=\"{input_class}\" title=\"{label}\" value=\"{label}\" />\
             </form>",
            html_escape(&url),
            kind.method(),
        )
    }
}
