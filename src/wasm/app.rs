//! The running page session.
//!
//! `App` owns everything mutable: the animator, the hero scene and the
//! transition controller. It lives in an `Rc<RefCell<_>>` shared by the frame
//! loop and the event listeners. A borrow is held only for one event, one
//! frame or one command.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::clock::Clock;
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::intro;
use crate::transition::{Command, NavRequest, TransitionController};
use crate::tween::{Ease, ScalarTween};
use crate::wasm::animator::{AnimationId, Animator};
use crate::wasm::dom::{self, PageElements};
use crate::wasm::frame::{self, FrameHandle};
use crate::wasm::router::{self, FetchedPage};
use crate::wasm::scene::{self, SceneContext};

pub type SharedApp = Rc<RefCell<App>>;
type PageCommand = Command<FetchedPage>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fade {
    Out,
    In,
}

#[derive(Debug)]
pub struct App {
    pub config: SiteConfig,
    pub window: Window,
    pub document: Document,
    pub elements: PageElements,
    pub animator: Animator,
    pub scene: Option<SceneContext>,
    clock: Clock,
    transitions: TransitionController<FetchedPage>,
    intro: Option<AnimationId>,
    fade: Option<(AnimationId, Fade)>,
    entering_opacity: f64,
}

impl App {
    pub fn new(window: Window, document: Document, config: SiteConfig) -> Self {
        let elements = PageElements::query(&document, &config);
        let scene = SceneContext::init(&window, elements.canvas.clone(), &config);
        Self {
            clock: Clock::new(dom::now_ms(&window)),
            transitions: TransitionController::new(&config),
            animator: Animator::new(),
            intro: None,
            fade: None,
            entering_opacity: 1.0,
            config,
            window,
            document,
            elements,
            scene,
        }
    }

    pub fn now_ms(&self) -> f64 {
        dom::now_ms(&self.window)
    }

    /// Play the intro sequence, replacing one already running.
    pub fn run_intro(&mut self) -> Option<AnimationId> {
        self.cancel_intro();
        let root = dom::document_root(&self.document)?;
        let targets: Vec<_> = intro::GROUPS.iter().map(|sel| dom::query_all(&root, sel)).collect();
        let counts: Vec<usize> = targets.iter().map(Vec::len).collect();
        let timeline = intro::timeline(&counts);
        if timeline.tweens().is_empty() {
            return None;
        }
        let now = self.now_ms();
        let id = self.animator.play_timeline(&self.window, timeline, targets, now);
        self.intro = Some(id);
        Some(id)
    }

    pub fn cancel_intro(&mut self) {
        if let Some(id) = self.intro.take() {
            self.animator.cancel(id);
        }
    }

    pub fn resize(&mut self) {
        scene::resize(self.scene.as_mut(), &self.window);
    }

    /// Smooth-scroll so the element matching `selector` sits below the header.
    pub fn scroll_to(&mut self, selector: &str) {
        let Some(target) = dom::query(&self.document, selector)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let y = crate::input::scroll_target(target.offset_top() as f64, self.config.header_offset);
        let now = self.now_ms();
        self.animator
            .scroll_window(&self.window, y, self.config.scroll_duration, Ease::Power2InOut, now);
    }

    pub fn toggle_menu(&self) {
        if let (Some(ham), Some(nav)) = (&self.elements.hamburger, &self.elements.nav_list) {
            super::input::toggle_menu(ham, nav, &self.config.open_class);
        }
    }

    pub fn navigate(&mut self, request: NavRequest) -> Vec<PageCommand> {
        log::info!("navigate: {}", request.url);
        self.transitions.navigate(request)
    }

    pub fn page_loaded(&mut self, url: &str, page: FetchedPage) -> Vec<PageCommand> {
        self.transitions.page_loaded(url, page)
    }

    pub fn load_failed(&mut self, url: &str) -> Vec<PageCommand> {
        self.transitions.load_failed(url)
    }

    /// One display refresh: advance animations, react to finished fades,
    /// then update and draw the scene.
    pub fn frame(&mut self, now_ms: f64) -> Vec<PageCommand> {
        let mut commands = Vec::new();
        for id in self.animator.tick(now_ms) {
            if self.intro == Some(id) {
                self.intro = None;
            }
            match self.fade {
                Some((fade_id, Fade::Out)) if fade_id == id => {
                    self.fade = None;
                    commands.extend(self.transitions.leave_finished());
                }
                Some((fade_id, Fade::In)) if fade_id == id => {
                    self.fade = None;
                    commands.extend(self.transitions.enter_finished());
                }
                _ => {}
            }
        }
        scene::frame(self.scene.as_mut(), self.clock.elapsed(now_ms));
        commands
    }

    /// Run one transition command. Fetches are started by [`dispatch`].
    fn execute(&mut self, command: PageCommand) -> Result<Vec<PageCommand>, SiteError> {
        match command {
            Command::CancelIntro => self.cancel_intro(),
            Command::FadeOut => match router::current_container(&self.document, &self.config) {
                Some(container) => self.start_fade(container, Fade::Out),
                None => return Ok(self.transitions.leave_finished()),
            },
            Command::Swap { page, request } => {
                match router::swap(&self.window, &self.document, &page, &request, &self.config) {
                    Ok((_, resting)) => self.entering_opacity = resting,
                    Err(e) => {
                        log::warn!("swap failed: {e}");
                        self.fade = None;
                        self.transitions.abort();
                        return Ok(vec![Command::HardNavigate(request.url)]);
                    }
                }
            }
            Command::ScrollTop => self.window.scroll_to_with_x_and_y(0.0, 0.0),
            Command::FadeIn => match router::current_container(&self.document, &self.config) {
                Some(container) => self.start_fade(container, Fade::In),
                None => return Ok(self.transitions.enter_finished()),
            },
            Command::RunIntro => {
                self.run_intro();
            }
            Command::ResizeViewport => self.resize(),
            Command::HardNavigate(url) => self.window.location().set_href(&url)?,
            Command::Fetch(url) => log::error!("fetch for {url} reached execute"),
        }
        Ok(Vec::new())
    }

    fn start_fade(&mut self, container: HtmlElement, fade: Fade) {
        let (from, to) = match fade {
            Fade::Out => (dom::computed_opacity(&self.window, &container), 0.0),
            Fade::In => (0.0, self.entering_opacity),
        };
        let tween = ScalarTween::new(from, to, self.config.fade_duration, Ease::default());
        let now = self.now_ms();
        let id = self.animator.fade(container, tween, fade == Fade::In, now);
        self.fade = Some((id, fade));
    }
}

/// Run `commands` and everything they lead to. Page fetches are spawned as
/// local tasks that report back through the same dispatcher.
pub fn dispatch(app: &SharedApp, commands: Vec<PageCommand>) {
    let mut queue: VecDeque<PageCommand> = commands.into();
    while let Some(command) = queue.pop_front() {
        if let Command::Fetch(url) = command {
            spawn_fetch(app.clone(), url);
            continue;
        }
        match app.borrow_mut().execute(command) {
            Ok(follow_up) => queue.extend(follow_up),
            Err(e) => log::warn!("transition step failed: {e}"),
        }
    }
}

fn spawn_fetch(app: SharedApp, url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let config = app.borrow().config.clone();
        let result = router::fetch_page(&url, &config).await;
        let commands = match result {
            Ok(page) => app.borrow_mut().page_loaded(&url, page),
            Err(e) => {
                log::warn!("could not load {url}: {e}");
                app.borrow_mut().load_failed(&url)
            }
        };
        dispatch(&app, commands);
    });
}

/// Start the per-frame loop for `app`. Cancelling the returned handle stops it.
pub fn start_frames(app: &SharedApp) -> Result<FrameHandle, SiteError> {
    let window = app.borrow().window.clone();
    let shared = app.clone();
    let handle = frame::start(&window, move |now_ms| {
        let commands = shared.borrow_mut().frame(now_ms);
        if !commands.is_empty() {
            dispatch(&shared, commands);
        }
    })?;
    Ok(handle)
}
