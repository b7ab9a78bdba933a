//! GraphQL schema for the playground.

use field_guard::{
    ArgumentPath, Authorizer, ConfigurationError, FieldAuthorization, FieldGuard, ScopeType,
    TypeRef,
};
use juniper::{
    graphql_object, EmptySubscription, FieldError, FieldResult, GraphQLInputObject,
    GraphQLObject, RootNode,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::info;

use crate::policy::{Caller, PlaygroundPolicy, Scope, UserScope};

#[derive(Debug, Clone, GraphQLObject)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(GraphQLInputObject)]
pub struct UpdateProfileInput {
    pub user_id: i32,
    pub bio: String,
}

/// In-memory users, seeded with a few records.
pub struct UserStore {
    users: Mutex<BTreeMap<i32, User>>,
}

impl UserStore {
    pub fn seeded() -> Self {
        let users = [(1, "Ada"), (7, "Grace"), (9, "Edsger")]
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    User {
                        id,
                        name: name.to_string(),
                        bio: None,
                    },
                )
            })
            .collect();
        Self {
            users: Mutex::new(users),
        }
    }

    fn with_users<T>(&self, f: impl FnOnce(&mut BTreeMap<i32, User>) -> T) -> FieldResult<T> {
        let mut users = self
            .users
            .lock()
            .map_err(|_| FieldError::new("User store unavailable", juniper::Value::null()))?;
        Ok(f(&mut *users))
    }

    fn update(&self, id: i32, change: impl FnOnce(&mut User)) -> FieldResult<User> {
        self.with_users(|users| {
            users.get_mut(&id).map(|user| {
                change(user);
                user.clone()
            })
        })?
        .ok_or_else(|| FieldError::new("User not found", juniper::Value::null()))
    }
}

/// One guard per protected field, attached once at startup.
pub struct Guards {
    user: FieldGuard<PlaygroundPolicy>,
    profile: FieldGuard<PlaygroundPolicy>,
    update_user: FieldGuard<PlaygroundPolicy>,
    update_profile: FieldGuard<PlaygroundPolicy>,
    create_user: FieldGuard<PlaygroundPolicy>,
    delete_user: FieldGuard<PlaygroundPolicy>,
}

impl Guards {
    pub fn attach(authorizer: &Authorizer<PlaygroundPolicy>) -> Result<Self, ConfigurationError> {
        let user = ScopeType::<Scope>::of::<UserScope>("User");

        Ok(Self {
            user: authorizer.attach("user", FieldAuthorization::permit("user").scope(user))?,
            profile: authorizer.attach(
                "profile",
                FieldAuthorization::permit("user")
                    .scope(user)
                    .args([("id", ArgumentPath::from("userId"))])
                    .optional(true),
            )?,
            update_user: authorizer.attach(
                "updateUser",
                FieldAuthorization::permit(["user", "admin"]).scope(user).args("id"),
            )?,
            update_profile: authorizer.attach(
                "updateProfile",
                FieldAuthorization::permit("user")
                    .scope(user)
                    .args([("id", ArgumentPath::nested(["input", "userId"]))])
                    .rule("owner"),
            )?,
            create_user: authorizer.attach("createUser", FieldAuthorization::permit("all"))?,
            delete_user: authorizer
                .attach("deleteUser", FieldAuthorization::permit("admin").scope(user))?,
        })
    }
}

pub struct PlaygroundContext {
    pub caller: Caller,
    pub store: UserStore,
    pub guards: Guards,
}

impl juniper::Context for PlaygroundContext {}

fn user_type() -> TypeRef {
    TypeRef::non_null(TypeRef::named("User"))
}

pub struct Query;

#[graphql_object(context = PlaygroundContext)]
impl Query {
    fn user(context: &PlaygroundContext, id: i32) -> FieldResult<Option<User>> {
        context
            .guards
            .user
            .check(json!({ "id": id }), TypeRef::named("User"), &context.caller)?;
        context.store.with_users(|users| users.get(&id).cloned())
    }

    /// The caller's own profile, or another user's when `userId` is given.
    fn profile(context: &PlaygroundContext, user_id: Option<i32>) -> FieldResult<Option<User>> {
        context
            .guards
            .profile
            .check(json!({ "userId": user_id }), TypeRef::named("User"), &context.caller)?;

        let id = match user_id.map(i64::from).or(context.caller.user_id) {
            Some(id) => i32::try_from(id)?,
            None => return Ok(None),
        };
        context.store.with_users(|users| users.get(&id).cloned())
    }
}

pub struct Mutation;

#[graphql_object(context = PlaygroundContext)]
impl Mutation {
    fn update_user(context: &PlaygroundContext, id: i32, name: String) -> FieldResult<User> {
        context.guards.update_user.check(
            json!({ "id": id, "name": name }),
            user_type(),
            &context.caller,
        )?;

        info!(user_id = id, "Updating user");
        context.store.update(id, |user| user.name = name)
    }

    fn update_profile(context: &PlaygroundContext, input: UpdateProfileInput) -> FieldResult<User> {
        context.guards.update_profile.check(
            json!({ "input": { "userId": input.user_id, "bio": input.bio } }),
            user_type(),
            &context.caller,
        )?;

        info!(user_id = input.user_id, "Updating profile");
        context
            .store
            .update(input.user_id, |user| user.bio = Some(input.bio))
    }

    fn create_user(context: &PlaygroundContext, name: String) -> FieldResult<User> {
        context
            .guards
            .create_user
            .check(json!({ "name": name }), user_type(), &context.caller)?;

        context.store.with_users(|users| {
            let id = users.keys().next_back().copied().unwrap_or(0) + 1;
            let user = User { id, name, bio: None };
            users.insert(id, user.clone());
            info!(user_id = id, "Created user");
            user
        })
    }

    fn delete_user(context: &PlaygroundContext, id: i32) -> FieldResult<User> {
        context
            .guards
            .delete_user
            .check(json!({ "id": id }), user_type(), &context.caller)?;

        context
            .store
            .with_users(|users| users.remove(&id))?
            .ok_or_else(|| FieldError::new("User not found", juniper::Value::null()))
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<PlaygroundContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
