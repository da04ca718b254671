use fluentsql::{Operator, Statement, Table, TableSchema, select, update};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Table)]
enum Users {
    Id,
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, Table)]
#[table(name = "audit_log", rename_all = "snake_case")]
enum AuditLog {
    EntryId,
    UserId,
    #[table(rename = "msg")]
    Message,
}

#[derive(Debug, Clone, Copy, Table)]
#[table(rename_all = "SCREAMING_SNAKE_CASE")]
enum Settings {
    KeyName,
    Value,
}

#[test]
fn schema_uses_enum_and_variant_names() {
    assert_eq!(
        Users::SCHEMA,
        TableSchema::new("Users", &["Id", "Name", "Email"])
    );
    assert_eq!(Users::Email.column_index(), 2);
    assert_eq!(Users::Name.column_name(), "Name");
    assert_eq!(Users::table_name(), "Users");
}

#[test]
fn attributes_rename_table_and_columns() {
    assert_eq!(AuditLog::SCHEMA.name, "audit_log");
    assert_eq!(AuditLog::SCHEMA.columns, &["entry_id", "user_id", "msg"]);
    assert_eq!(Settings::SCHEMA.columns, &["KEY_NAME", "VALUE"]);
}

#[test]
fn derived_tables_drive_builders() {
    let sql = select::<AuditLog>()
        .columns([AuditLog::EntryId, AuditLog::Message])
        .from()
        .start_where()
        .where_(AuditLog::UserId, Operator::Equal, 7)
        .end_where()
        .to_sql();
    assert_eq!(
        sql,
        "SELECT entry_id, msg FROM audit_log WHERE audit_log.user_id=7;"
    );

    let sql = update::<Settings>()
        .set_value(Settings::Value, "on")
        .start_where()
        .where_(Settings::KeyName, Operator::Like, "feature.%")
        .end_where()
        .to_sql();
    assert_eq!(
        sql,
        "UPDATE Settings SET VALUE='on' WHERE Settings.KEY_NAME LIKE 'feature.%';"
    );
}
