#[cfg(test)]
mod tests {
    use crate::args::{Arg, args};
    use crate::builder::Builder;
    use crate::delete::Delete;
    use crate::filter::Filter;
    use crate::flavor::{Flavor, set_default_flavor_scoped};
    use crate::mutate::{Mutate, Mutates};
    use crate::mutates;
    use crate::update::Update;
    use pretty_assertions::assert_eq;

    #[test]
    fn update_skips_primary() {
        let up = Update::new(
            "users",
            mutates! { "id" => 1, "name" => "Bob", inc "visits" => 1 },
        )
        .primary("id")
        .where_(Filter::eq("id", 1));
        let (sql, args) = up.build_with(Flavor::MySQL.shared()).unwrap();
        assert_eq!(
            sql,
            "UPDATE `users` SET `name`=?,`visits`=`visits`+? WHERE `id`=?;"
        );
        assert_eq!(args, vec![Arg::from("Bob"), Arg::from(1), Arg::from(1)]);
    }

    #[test]
    fn update_fragment_and_dec() {
        let mut m = Mutates::new().fragment("score = score * ?", args([2]));
        m.insert(Mutate::dec("stock", 3));
        m.insert(Mutate::set("name", "x"));

        let (sql, args) = Update::new("items", m)
            .build_with(Flavor::MySQL.shared())
            .unwrap();
        assert_eq!(sql, "UPDATE `items` SET score = score * ?,`stock`=`stock`+?,`name`=?;");
        assert_eq!(args, vec![Arg::from(2), Arg::from(-3_i64), Arg::from("x")]);
    }

    #[test]
    fn update_postgres_ordinals() {
        let up = Update::new("users", mutates! { "name" => "a", "age" => 2 })
            .where_(Filter::eq("id", 1))
            .where_(Filter::not_nil("email"));
        let (sql, _) = up.build_with(Flavor::PostgreSQL.shared()).unwrap();
        assert_eq!(
            sql,
            "UPDATE \"users\" SET \"name\"=$1,\"age\"=$2 WHERE (\"id\"=$3 AND \"email\" IS NOT NULL);"
        );
    }

    #[test]
    fn update_replaces_same_key() {
        let up = Update::new("users", mutates! { "name" => "a", "name" => "b" });
        let (sql, args) = up.build_with(Flavor::MySQL.shared()).unwrap();
        assert_eq!(sql, "UPDATE `users` SET `name`=?;");
        assert_eq!(args, vec![Arg::from("b")]);
    }

    #[test]
    fn delete_statements() {
        let _g = set_default_flavor_scoped(Flavor::MySQL);

        let (sql, args) = Delete::new("users").where_(Filter::eq("id", 1)).build().unwrap();
        assert_eq!(sql, "DELETE FROM `users` WHERE `id`=?;");
        assert_eq!(args, vec![Arg::from(1)]);

        let (sql, args) = Delete::new("users").build().unwrap();
        assert_eq!(sql, "DELETE FROM `users`;");
        assert!(args.is_empty());
    }

    #[test]
    fn delete_with_subquery() {
        let del = Delete::new("sessions").where_(Filter::in_query(
            "user_id",
            crate::query::Query::table("users")
                .select("id")
                .where_(Filter::eq("banned", true)),
        ));
        let (sql, _) = del.build_with(Flavor::PostgreSQL.shared()).unwrap();
        assert_eq!(
            sql,
            "DELETE FROM \"sessions\" WHERE \"user_id\" IN (SELECT \"id\" FROM \"users\" WHERE \"banned\"=$1);"
        );
    }
}
