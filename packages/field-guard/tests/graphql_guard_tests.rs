//! Guarded juniper resolvers executed against a real schema.

mod common;

use common::{AppPolicy, RequestContext, Scope, User};
use field_guard::{Authorizer, FieldAuthorization, FieldGuard, ScopeType, TypeRef};
use juniper::{
    graphql_object, graphql_value, EmptySubscription, FieldResult, GraphQLObject, RootNode,
    Variables,
};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Schema
// ============================================================================

struct Guards {
    user: FieldGuard<AppPolicy>,
    update_user: FieldGuard<AppPolicy>,
    create_user: FieldGuard<AppPolicy>,
}

impl Guards {
    fn new() -> Self {
        let authorizer = Authorizer::new(Arc::new(AppPolicy::default()));
        let user_scope = ScopeType::<Scope>::of::<User>("User");
        Self {
            user: authorizer
                .attach("user", FieldAuthorization::permit("user").scope(user_scope))
                .unwrap(),
            update_user: authorizer
                .attach("updateUser", FieldAuthorization::permit("user").scope(user_scope).args("id"))
                .unwrap(),
            create_user: authorizer
                .attach("createUser", FieldAuthorization::permit("all").scope(user_scope))
                .unwrap(),
        }
    }
}

struct Context {
    request: RequestContext,
    guards: Guards,
}

impl juniper::Context for Context {}

#[derive(GraphQLObject)]
struct UserObject {
    id: i32,
    name: String,
}

struct Query;

#[graphql_object(context = Context)]
impl Query {
    fn user(context: &Context, id: i32) -> FieldResult<Option<UserObject>> {
        context
            .guards
            .user
            .check(json!({ "id": id }), TypeRef::named("User"), &context.request)?;
        Ok(Some(UserObject {
            id,
            name: format!("user-{}", id),
        }))
    }
}

struct Mutation;

#[graphql_object(context = Context)]
impl Mutation {
    fn update_user(context: &Context, id: i32, name: String) -> FieldResult<Option<UserObject>> {
        context.guards.update_user.check(
            json!({ "id": id, "name": name }),
            TypeRef::named("User"),
            &context.request,
        )?;
        Ok(Some(UserObject { id, name }))
    }

    fn create_user(context: &Context, name: String) -> FieldResult<Option<UserObject>> {
        context.guards.create_user.check(
            json!({ "name": name }),
            TypeRef::named("User"),
            &context.request,
        )?;
        Ok(Some(UserObject { id: 100, name }))
    }
}

type Schema = RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

fn context(request: RequestContext) -> Context {
    Context {
        request,
        guards: Guards::new(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn owner_can_update_user() {
    let ctx = context(RequestContext::as_user(7, "user"));

    let (data, errors) = juniper::execute_sync(
        r#"mutation { updateUser(id: 7, name: "Ada") { id name } }"#,
        None,
        &schema(),
        &Variables::new(),
        &ctx,
    )
    .unwrap();

    assert!(errors.is_empty());
    assert_eq!(
        data,
        graphql_value!({"updateUser": {"id": 7, "name": "Ada"}})
    );
}

#[test]
fn non_owner_gets_scope_denial() {
    let ctx = context(RequestContext::as_user(9, "user"));

    let (data, errors) = juniper::execute_sync(
        r#"mutation { updateUser(id: 7, name: "Ada") { id } }"#,
        None,
        &schema(),
        &Variables::new(),
        &ctx,
    )
    .unwrap();

    assert_eq!(data, graphql_value!({"updateUser": null}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error().message(), "not allowed to act on this User");
    assert_eq!(
        errors[0].error().extensions(),
        &graphql_value!({"code": "FORBIDDEN"})
    );
}

#[test]
fn anonymous_create_user_is_never_scoped() {
    let ctx = context(RequestContext::anonymous());

    let (data, errors) = juniper::execute_sync(
        r#"mutation { createUser(name: "Grace") { id name } }"#,
        None,
        &schema(),
        &Variables::new(),
        &ctx,
    )
    .unwrap();

    assert!(errors.is_empty());
    assert_eq!(
        data,
        graphql_value!({"createUser": {"id": 100, "name": "Grace"}})
    );
    assert_eq!(ctx.guards.create_user.policy().ownership_calls(), 0);
}

#[tokio::test]
async fn anonymous_query_gets_role_denial() {
    let ctx = context(RequestContext::anonymous());

    let (data, errors) = juniper::execute(
        "query { user(id: 7) { id } }",
        None,
        &schema(),
        &Variables::new(),
        &ctx,
    )
    .await
    .unwrap();

    assert_eq!(data, graphql_value!({"user": null}));
    assert_eq!(errors[0].error().message(), "not allowed to call user");
}
