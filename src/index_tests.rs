#[cfg(test)]
mod tests {
    use crate::builder::Builder;
    use crate::filter::Filter;
    use crate::flavor::Flavor;
    use crate::schema::{Index, Migration, Schema, Table, Column, ColumnType};
    use pretty_assertions::assert_eq;

    fn ddl(index: &Index, flavor: Flavor) -> String {
        let (sql, args) = index.build_with(flavor.shared()).unwrap();
        assert!(args.is_empty());
        sql
    }

    #[test]
    fn create_index() {
        let idx = Index::create("idx_users_email", "users", ["email"]).unique();
        assert_eq!(
            ddl(&idx, Flavor::MySQL),
            "CREATE UNIQUE INDEX `idx_users_email` ON `users` (`email`);"
        );
    }

    #[test]
    fn partial_index_inlines_filter() {
        let idx = Index::create("idx_active", "users", ["email", "name"])
            .optional()
            .filter(Filter::and([Filter::eq("active", true), Filter::eq("role", "admin")]));
        assert_eq!(
            ddl(&idx, Flavor::PostgreSQL),
            "CREATE INDEX IF NOT EXISTS \"idx_active\" ON \"users\" (\"email\", \"name\") WHERE (\"active\"=TRUE AND \"role\"='admin');"
        );
        assert_eq!(
            ddl(&idx, Flavor::SQLite),
            "CREATE INDEX IF NOT EXISTS \"idx_active\" ON \"users\" (\"email\", \"name\") WHERE (\"active\"=1 AND \"role\"='admin');"
        );
    }

    #[test]
    fn index_options() {
        let idx = Index::create("idx_name", "users", ["name"]).options("USING BTREE");
        assert_eq!(
            ddl(&idx, Flavor::MySQL),
            "CREATE INDEX `idx_name` ON `users` (`name`) USING BTREE;"
        );
    }

    #[test]
    fn drop_index_per_flavor() {
        let idx = Index::drop("idx_name", "users");
        assert_eq!(ddl(&idx, Flavor::MySQL), "DROP INDEX `idx_name` ON `users`;");
        assert_eq!(ddl(&idx, Flavor::SQLServer), "DROP INDEX [idx_name] ON [users];");
        assert_eq!(
            ddl(&idx.clone().optional(), Flavor::PostgreSQL),
            "DROP INDEX IF EXISTS \"idx_name\";"
        );
    }

    #[test]
    fn schema_accumulates_in_order() {
        let mut schema = Schema::new();
        schema
            .create_table("users", |t| {
                t.column(Column::new("id", ColumnType::Id))
                    .column(Column::new("email", ColumnType::String))
            })
            .create_index("users", "idx_users_email", ["email"])
            .alter_table("users", |t| t.column(Column::drop("legacy")))
            .rename_table("users", "accounts")
            .drop_index("accounts", "idx_users_email")
            .exec("VACUUM")
            .drop_table("accounts");

        assert_eq!(schema.migrations.len(), 7);
        assert!(matches!(schema.migrations[5], Migration::Raw(ref s) if s == "VACUUM"));

        let statements = schema.build_with(Flavor::MySQL.shared()).unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE `users` (`id` INT UNSIGNED AUTO_INCREMENT PRIMARY KEY, `email` VARCHAR(255));".to_string(),
                "CREATE INDEX `idx_users_email` ON `users` (`email`);".to_string(),
                "ALTER TABLE `users` DROP COLUMN `legacy`;".to_string(),
                "ALTER TABLE `users` RENAME TO `accounts`;".to_string(),
                "DROP INDEX `idx_users_email` ON `accounts`;".to_string(),
                "VACUUM".to_string(),
                "DROP TABLE `accounts`;".to_string(),
            ]
        );
    }

    #[test]
    fn migration_from_nodes() {
        let m: Migration = Table::drop("t").into();
        assert_eq!(m.build_with(Flavor::PostgreSQL.shared()).unwrap(), "DROP TABLE \"t\";");
    }
}
