#![cfg(not(target_arch = "wasm32"))]

use bookshelf_business::{Route, Session, navigate};
use kittest::Queryable;

use crate::common::TestCtx;

mod common;

fn route(ctx: &mut TestCtx<'_>) -> Route {
    *ctx.harness_mut().state().state().ctx.state::<Route>()
}

#[tokio::test]
async fn test_restored_session_never_shows_sign_in_form() {
    let mut ctx = TestCtx::new_app_with(|state| state.restore_session(Session::new("abc"))).await;

    let harness = ctx.harness_mut();
    harness.step();
    harness.step();

    assert_eq!(route(&mut ctx), Route::Library);
    let harness = ctx.harness_mut();
    assert!(
        harness.query_by_label("Join Now").is_none(),
        "sign-in form must not be rendered for a signed-in reader"
    );
    assert!(harness.query_by_label("My Library").is_some());
}

#[tokio::test]
async fn test_empty_token_stays_on_sign_in() {
    let mut ctx = TestCtx::new_app_with(|state| state.restore_session(Session::new(""))).await;

    ctx.harness_mut().step();

    assert_eq!(route(&mut ctx), Route::Login);
    assert!(ctx.harness_mut().query_by_label("Join Now").is_some());
}

#[tokio::test]
async fn test_returning_to_sign_in_while_signed_in_redirects_again() {
    let mut ctx = TestCtx::new_app_with(|state| state.restore_session(Session::new("abc"))).await;
    ctx.harness_mut().step();
    ctx.harness_mut().step();

    navigate(&mut ctx.harness_mut().state_mut().state_mut().ctx, Route::Login);
    ctx.harness_mut().step();

    assert_eq!(route(&mut ctx), Route::Library);
}

#[tokio::test]
async fn test_sign_out_returns_to_sign_in() {
    let mut ctx = TestCtx::new_app_with(|state| state.restore_session(Session::new("abc"))).await;
    ctx.harness_mut().step();
    ctx.harness_mut().step();

    let harness = ctx.harness_mut();
    if let Some(button) = harness.query_by_label("Sign Out") {
        button.click();
    }
    harness.step();
    ctx.settle().await;

    assert_eq!(route(&mut ctx), Route::Login);
    assert!(!ctx.harness_mut().state().state().session().is_authenticated());
    assert!(ctx.harness_mut().query_by_label("Join Now").is_some());
}

#[tokio::test]
async fn test_links_navigate_to_placeholder_pages() {
    let mut ctx = TestCtx::new_app().await;
    ctx.harness_mut().step();

    let harness = ctx.harness_mut();
    if let Some(link) = harness.query_by_label("Forget Password?") {
        link.click();
    }
    harness.step();
    harness.step();
    assert_eq!(route(&mut ctx), Route::ForgetPassword);

    let harness = ctx.harness_mut();
    if let Some(link) = harness.query_by_label("Back to Sign In") {
        link.click();
    }
    harness.step();
    harness.step();
    assert_eq!(route(&mut ctx), Route::Login);

    let harness = ctx.harness_mut();
    if let Some(link) = harness.query_by_label("Join Now") {
        link.click();
    }
    harness.step();
    harness.step();
    assert_eq!(route(&mut ctx), Route::Register);
    assert_eq!(route(&mut ctx).path(), "/register");
}
