//! Route loop: restores the session once, then hands control from view to
//! view until one of them quits.

use std::future::Future;

use anyhow::Result;
use mycal_core::guard::{GuardDecision, Route, SessionGuard};
use mycal_core::identity::{Identity, IdentityGateway, IdentityProvider};
use mycal_core::picker::YearRange;
use owo_colors::OwoColorize;

use crate::utils::tui::with_spinner;
use crate::views;

/// What a view asks the router to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Go(Route),
    Quit,
}

/// The views the router can hand control to.
pub trait Screens {
    fn calendar<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
        identity: &Identity,
        years: YearRange,
    ) -> impl Future<Output = Result<Navigation>>;

    fn login<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
    ) -> impl Future<Output = Result<Navigation>>;

    fn signup<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
    ) -> impl Future<Output = Result<Navigation>>;
}

/// Interactive views on the terminal.
pub struct TerminalScreens;

impl Screens for TerminalScreens {
    async fn calendar<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
        identity: &Identity,
        years: YearRange,
    ) -> Result<Navigation> {
        views::calendar::run(gateway, identity, years).await
    }

    async fn login<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
    ) -> Result<Navigation> {
        views::login::run(gateway).await
    }

    async fn signup<P: IdentityProvider>(
        &mut self,
        gateway: &IdentityGateway<P>,
    ) -> Result<Navigation> {
        views::signup::run(gateway).await
    }
}

pub async fn run<P: IdentityProvider>(
    gateway: &IdentityGateway<P>,
    years: YearRange,
    start: Route,
) -> Result<()> {
    if gateway.session().loading {
        println!("{}", "Loading...".dimmed());
    }
    with_spinner("Checking session...", gateway.restore()).await;

    route_loop(gateway, years, start, &mut TerminalScreens).await
}

/// Follow navigation from `start` until a screen quits. The calendar is
/// only shown for a resolved, signed-in session.
pub async fn route_loop<P: IdentityProvider, S: Screens>(
    gateway: &IdentityGateway<P>,
    years: YearRange,
    start: Route,
    screens: &mut S,
) -> Result<()> {
    let mut sessions = gateway.subscribe();
    let mut guard = SessionGuard::new();

    let mut route = start;
    loop {
        tracing::debug!(%route, "navigating");

        let next = match route {
            Route::Root => match guard.resolve(&mut sessions).await {
                GuardDecision::Render(identity) => {
                    screens.calendar(gateway, &identity, years).await?
                }
                GuardDecision::Redirect(to) => Navigation::Go(to),
                GuardDecision::Loading => Navigation::Go(Route::Login),
            },
            Route::Login => screens.login(gateway).await?,
            Route::Signup => screens.signup(gateway).await?,
        };

        match next {
            Navigation::Go(to) => route = to,
            Navigation::Quit => return Ok(()),
        }
    }
}
