//! Page transition state machine.
//!
//! The controller never touches the DOM. Every input returns the commands
//! the host must run, and completion of those commands is fed back as the
//! next input. Transitions are serialized: while one is in flight, new
//! navigation requests collapse into a single pending request.
//!
//! ```text
//!  Idle --navigate--> Leaving --faded + loaded--> Entering --enter_finished--> Idle
//!                        |
//!                   load_failed --> Idle (hard navigation)
//! ```

use crate::config::SiteConfig;

/// A fetched view that can be swapped into the page.
pub trait View {
    fn namespace(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavRequest {
    pub url: String,
    /// False for history traversal, where the browser already moved.
    pub push_history: bool,
}

impl NavRequest {
    pub fn link(url: impl Into<String>) -> Self {
        Self { url: url.into(), push_history: true }
    }

    pub fn history(url: impl Into<String>) -> Self {
        Self { url: url.into(), push_history: false }
    }
}

#[derive(Debug, PartialEq)]
pub enum Phase<P> {
    Idle,
    Leaving {
        request: NavRequest,
        faded: bool,
        page: Option<P>,
    },
    Entering {
        request: NavRequest,
        namespace: Option<String>,
    },
}

#[derive(Debug, PartialEq)]
pub enum Command<P> {
    /// Stop and clear any running intro animation.
    CancelIntro,
    /// Fade the current container out; report with `leave_finished`.
    FadeOut,
    /// Load the next view; report with `page_loaded` or `load_failed`.
    Fetch(String),
    Swap { page: P, request: NavRequest },
    ScrollTop,
    /// Fade the new container in; report with `enter_finished`.
    FadeIn,
    RunIntro,
    ResizeViewport,
    /// Give up on the animated transition and let the browser load the page.
    HardNavigate(String),
}

#[derive(Debug)]
pub struct TransitionController<P> {
    phase: Phase<P>,
    pending: Option<NavRequest>,
    config: SiteConfig,
}

impl<P: View> TransitionController<P> {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            phase: Phase::Idle,
            pending: None,
            config: config.clone(),
        }
    }

    pub fn phase(&self) -> &Phase<P> {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn pending(&self) -> Option<&NavRequest> {
        self.pending.as_ref()
    }

    pub fn navigate(&mut self, request: NavRequest) -> Vec<Command<P>> {
        match &self.phase {
            Phase::Idle => {
                log::debug!("transition: leaving for {}", request.url);
                let url = request.url.clone();
                self.phase = Phase::Leaving { request, faded: false, page: None };
                vec![Command::CancelIntro, Command::FadeOut, Command::Fetch(url)]
            }
            // asking again for the view already on its way cancels any newer choice
            Phase::Leaving { request: current, .. } | Phase::Entering { request: current, .. }
                if current.url == request.url =>
            {
                self.pending = None;
                Vec::new()
            }
            _ => {
                log::debug!("transition busy; queueing {}", request.url);
                self.pending = Some(request);
                Vec::new()
            }
        }
    }

    pub fn leave_finished(&mut self) -> Vec<Command<P>> {
        match &mut self.phase {
            Phase::Leaving { faded, page, .. } => {
                *faded = true;
                if page.is_some() {
                    self.enter()
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    pub fn page_loaded(&mut self, url: &str, loaded: P) -> Vec<Command<P>> {
        match &mut self.phase {
            Phase::Leaving { request, faded, page } if request.url == url => {
                *page = Some(loaded);
                if *faded {
                    self.enter()
                } else {
                    Vec::new()
                }
            }
            _ => {
                log::debug!("transition: dropping stale page {url}");
                Vec::new()
            }
        }
    }

    pub fn load_failed(&mut self, url: &str) -> Vec<Command<P>> {
        match &self.phase {
            Phase::Leaving { request, .. } if request.url == url => {
                self.phase = Phase::Idle;
                self.pending = None;
                vec![Command::HardNavigate(url.to_string())]
            }
            _ => Vec::new(),
        }
    }

    pub fn enter_finished(&mut self) -> Vec<Command<P>> {
        let Phase::Entering { namespace, .. } = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return Vec::new();
        };
        let mut commands = vec![Command::RunIntro];
        if self.config.resizes_on_enter(namespace.as_deref()) {
            commands.push(Command::ResizeViewport);
        }
        if let Some(next) = self.pending.take() {
            commands.extend(self.navigate(next));
        }
        commands
    }

    /// Drop the in-flight transition and any pending request.
    pub fn abort(&mut self) {
        self.phase = Phase::Idle;
        self.pending = None;
    }

    fn enter(&mut self) -> Vec<Command<P>> {
        let Phase::Leaving { request, page: Some(page), .. } =
            std::mem::replace(&mut self.phase, Phase::Idle)
        else {
            return Vec::new();
        };
        let namespace = page.namespace().map(str::to_owned);
        log::debug!("transition: entering {namespace:?}");
        self.phase = Phase::Entering { request: request.clone(), namespace };
        vec![Command::Swap { page, request }, Command::ScrollTop, Command::FadeIn]
    }
}
