#[cfg(test)]
mod tests {
    use crate::args::{Arg, args};
    use crate::builder::Builder;
    use crate::filter::Filter;
    use crate::flavor::{Flavor, set_default_flavor_scoped};
    use crate::query::{JoinQuery, Query};
    use pretty_assertions::assert_eq;

    fn mysql(q: &Query) -> (String, Vec<Arg>) {
        q.build_with(Flavor::MySQL.shared()).unwrap()
    }

    #[test]
    fn select_with_where() {
        let q = Query::table("users")
            .select(["id", "name"])
            .where_(Filter::eq("id", 10));
        let (sql, args) = mysql(&q);
        assert_eq!(sql, "SELECT `id`,`name` FROM `users` WHERE `id`=?;");
        assert_eq!(args, vec![Arg::from(10)]);
    }

    #[test]
    fn select_defaults_to_wildcard() {
        assert_eq!(mysql(&Query::table("users")).0, "SELECT * FROM `users`;");
        assert_eq!(mysql(&Query::table("users").distinct()).0, "SELECT DISTINCT * FROM `users`;");
        assert_eq!(
            mysql(&Query::table("users").distinct().select("name")).0,
            "SELECT DISTINCT `name` FROM `users`;"
        );
    }

    #[test]
    fn none_filter_has_no_where() {
        let q = Query::table("users").where_(Filter::None).where_(Filter::and([]));
        assert_eq!(mysql(&q).0, "SELECT * FROM `users`;");
    }

    #[test]
    fn nested_none_filter_has_no_where() {
        let q = Query::table("users").where_(Filter::And(vec![Filter::None]));
        assert_eq!(mysql(&q).0, "SELECT * FROM `users`;");

        let q = Query::table("users").where_(Filter::And(vec![Filter::None, Filter::eq("id", 1)]));
        assert_eq!(mysql(&q).0, "SELECT * FROM `users` WHERE `id`=?;");

        let q = Query::table("orders")
            .group("user_id")
            .having(Filter::Or(vec![Filter::And(vec![])]));
        assert_eq!(mysql(&q).0, "SELECT * FROM `orders` GROUP BY `user_id`;");
    }

    #[test]
    fn where_calls_are_anded() {
        let q = Query::table("users")
            .where_(Filter::eq("active", true))
            .where_(Filter::nil("deleted_at"));
        assert_eq!(
            mysql(&q).0,
            "SELECT * FROM `users` WHERE (`active`=? AND `deleted_at` IS NULL);"
        );
    }

    #[test]
    fn join_inference() {
        let q = Query::table("users").join("addresses");
        assert_eq!(
            mysql(&q).0,
            "SELECT * FROM `users` JOIN `addresses` ON `users`.`address_id`=`addresses`.`id`;"
        );
    }

    #[test]
    fn join_explicit_columns() {
        let q = Query::table("users").join_on("transactions", "users.id", "transactions.user_id");
        assert_eq!(
            mysql(&q).0,
            "SELECT * FROM `users` JOIN `transactions` ON `users`.`id`=`transactions`.`user_id`;"
        );
    }

    #[test]
    fn join_with_filter() {
        let q = Query::table("users")
            .join_query(
                JoinQuery::left("orders")
                    .on("users.id", "orders.user_id")
                    .filter(Filter::eq("orders.status", "paid")),
            )
            .where_(Filter::gt("users.age", 18));
        let (sql, args) = mysql(&q);
        assert_eq!(
            sql,
            "SELECT * FROM `users` LEFT JOIN `orders` ON `users`.`id`=`orders`.`user_id` AND `orders`.`status`=? WHERE `users`.`age`>?;"
        );
        assert_eq!(args, vec![Arg::from("paid"), Arg::from(18)]);
    }

    #[test]
    fn raw_join_fragment() {
        let q = Query::table("users").join_fragment("JOIN `roles` ON `roles`.`id` = ?", args([1]));
        let (sql, args) = mysql(&q);
        assert_eq!(sql, "SELECT * FROM `users` JOIN `roles` ON `roles`.`id` = ?;");
        assert_eq!(args, vec![Arg::from(1)]);
    }

    #[test]
    fn group_having_ordinals() {
        let q = Query::table("orders")
            .select(["user_id", "^SUM(total) AS total"])
            .where_(Filter::and([Filter::gt("total", 10), Filter::eq("status", "paid")]))
            .group("user_id")
            .having(Filter::gt("^SUM(total)", 100));
        let (sql, args) = q.build_with(Flavor::PostgreSQL.shared()).unwrap();
        assert_eq!(
            sql,
            "SELECT \"user_id\",SUM(total) AS total FROM \"orders\" WHERE (\"total\">$1 AND \"status\"=$2) GROUP BY \"user_id\" HAVING SUM(total)>$3;"
        );
        assert_eq!(args, vec![Arg::from(10), Arg::from("paid"), Arg::from(100)]);
    }

    #[test]
    fn having_without_group_is_ignored() {
        let q = Query::table("orders").having(Filter::gt("total", 1));
        let (sql, args) = mysql(&q);
        assert_eq!(sql, "SELECT * FROM `orders`;");
        assert!(args.is_empty());
    }

    #[test]
    fn order_limit_offset_lock() {
        let q = Query::table("users")
            .sort_asc("name")
            .sort_desc("created_at")
            .limit(10)
            .offset(20)
            .for_update();
        assert_eq!(
            mysql(&q).0,
            "SELECT * FROM `users` ORDER BY `name` ASC,`created_at` DESC LIMIT 10 OFFSET 20 FOR UPDATE;"
        );
    }

    #[test]
    fn offset_requires_limit() {
        let q = Query::table("users").offset(5);
        assert_eq!(mysql(&q).0, "SELECT * FROM `users`;");
    }

    #[test]
    fn full_clause_order() {
        let q = Query::table("users")
            .select(["users.id", "COUNT(orders.id) AS n"])
            .join_on("orders", "users.id", "orders.user_id")
            .where_(Filter::eq("users.active", true))
            .group(["users.id"])
            .having(Filter::gt("^COUNT(orders.id)", 2))
            .sort_desc("n")
            .limit(5)
            .lock("LOCK IN SHARE MODE");
        assert_eq!(
            mysql(&q).0,
            concat!(
                "SELECT `users`.`id`,COUNT(`orders`.`id`) AS `n` FROM `users`",
                " JOIN `orders` ON `users`.`id`=`orders`.`user_id`",
                " WHERE `users`.`active`=?",
                " GROUP BY `users`.`id` HAVING COUNT(orders.id)>?",
                " ORDER BY `n` DESC LIMIT 5 LOCK IN SHARE MODE;"
            )
        );
    }

    #[test]
    fn raw_sql_overrides_everything() {
        let q = Query::sql("SELECT * FROM users WHERE id=?", args([1])).limit(5);
        let (sql, args) = mysql(&q);
        assert_eq!(sql, "SELECT * FROM users WHERE id=?;");
        assert_eq!(args, vec![Arg::from(1)]);
    }

    #[test]
    fn aggregate_selects_result_and_groups() {
        let q = Query::table("users")
            .select("name")
            .where_(Filter::eq("active", true))
            .group("gender")
            .aggregate("count", "id");
        assert_eq!(
            mysql(&q).0,
            "SELECT count(id) AS result,`gender` FROM `users` WHERE `active`=? GROUP BY `gender`;"
        );
    }

    #[test]
    fn build_uses_default_flavor() {
        let _g = set_default_flavor_scoped(Flavor::PostgreSQL);
        let (sql, _) = Query::table("users").where_(Filter::eq("id", 1)).build().unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" WHERE \"id\"=$1;");
    }

    #[test]
    fn sqlserver_quoting() {
        let q = Query::table("dbo.users").select("name").where_(Filter::eq("id", 1));
        let (sql, _) = q.build_with(Flavor::SQLServer.shared()).unwrap();
        assert_eq!(sql, "SELECT [name] FROM [dbo].[users] WHERE [id]=@p1;");
    }

    #[test]
    fn inline_dialect_query() {
        let dialect = Flavor::SQLite.dialect().with_inline_values(true);
        let q = Query::table("users").where_(Filter::and([
            Filter::eq("name", "O'Brien"),
            Filter::eq("active", true),
        ]));
        let (sql, args) = q.build_with(&dialect).unwrap();
        assert_eq!(sql, "SELECT * FROM \"users\" WHERE (\"name\"='O''Brien' AND \"active\"=1);");
        assert!(args.is_empty());
    }
}
