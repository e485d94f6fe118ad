use tabula_query::ColumnDescriptor;

use crate::config::TableConfig;

/// Entities with a built-in column set.
pub const ENTITIES: [&str; 7] = [
    "branch",
    "checkpoint",
    "organization",
    "user",
    "order",
    "role",
    "report",
];

/// Column set and endpoint for a built-in entity grid.
pub fn entity_config(entity: &str) -> Option<TableConfig> {
    let (endpoint, title, columns) = match entity {
        "branch" => ("/branches/list", "Branches", branch_columns()),
        "checkpoint" => ("/checkpoints/list", "Checkpoints", checkpoint_columns()),
        "organization" => ("/organizations/list", "Organizations", organization_columns()),
        "user" => ("/users/list", "Users", user_columns()),
        "order" => ("/orders/list", "Orders", order_columns()),
        "role" => ("/roles/list", "Roles", role_columns()),
        "report" => ("/reports/list", "Reports", report_columns()),
        _ => return None,
    };

    let mut config = TableConfig::new(entity, endpoint, columns);
    config.title = title.into();
    Some(config)
}

fn branch_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("name", "Name"),
        ColumnDescriptor::nested("organization_name", "Organization", "organization", "name")
            .with_accessor("organization.name"),
        ColumnDescriptor::nested("organization_id", "Organization ID", "organization", "id")
            .with_accessor("organization.id"),
        ColumnDescriptor::plain("address", "Address"),
        ColumnDescriptor::plain("phone", "Phone"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}

fn checkpoint_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("name", "Name"),
        ColumnDescriptor::nested("branch_name", "Branch", "branch", "branch_name")
            .with_accessor("branch.branch_name"),
        ColumnDescriptor::plain("address", "Address"),
        ColumnDescriptor::plain("location", "Location"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}

fn organization_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("name", "Name"),
        ColumnDescriptor::direct("tax_id", "Tax ID"),
        ColumnDescriptor::plain("branch_count", "Branches"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}

fn user_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("first_name", "First name"),
        ColumnDescriptor::direct("last_name", "Last name"),
        ColumnDescriptor::direct("phone", "Phone"),
        ColumnDescriptor::nested("role_name", "Role", "role", "name").with_accessor("role.name"),
        ColumnDescriptor::nested("organization_name", "Organization", "organization", "name")
            .with_accessor("organization.name"),
        ColumnDescriptor::direct("status", "Status"),
    ]
}

fn order_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("id", "No."),
        ColumnDescriptor::direct("title", "Title"),
        ColumnDescriptor::direct("status", "Status"),
        ColumnDescriptor::nested("branch_name", "Branch", "branch", "branch_name")
            .with_accessor("branch.branch_name"),
        ColumnDescriptor::nested("checkpoint_name", "Checkpoint", "checkpoint", "name")
            .with_accessor("checkpoint.name"),
        ColumnDescriptor::nested("assignee", "Assignee", "assignee", "last_name")
            .with_accessor("assignee.last_name"),
        ColumnDescriptor::direct("deadline", "Deadline"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}

fn role_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("name", "Name"),
        ColumnDescriptor::plain("permissions", "Permissions"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}

fn report_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::direct("id", "No."),
        ColumnDescriptor::nested("order_title", "Order", "order", "title")
            .with_accessor("order.title"),
        ColumnDescriptor::nested("checkpoint_name", "Checkpoint", "order.checkpoint", "name")
            .with_accessor("order.checkpoint.name"),
        ColumnDescriptor::plain("comment", "Comment"),
        ColumnDescriptor::direct("created_at", "Created"),
    ]
}
