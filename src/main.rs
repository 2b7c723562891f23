mod components;
mod logging;

use components::app::App;

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
