use sapling_dom::{
	memory::{HostError, MemoryDom, NodeId},
	render, render_naive, Dom as _, Element, EventHandler,
};

mod log_init_;

fn container(dom: &mut MemoryDom) -> NodeId {
	log_init_::init();
	let body = dom.body();
	let root = dom.create_element("div").unwrap();
	dom.append_child(&body, &root).unwrap();
	root
}

#[test]
fn scenario_a_splits_single_text_per_character() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	let tree = Element::new("div").class_name("c").child(Element::new("h1").single_child("Hi"));
	render_naive(&mut dom, &tree, &root).unwrap();

	assert_eq!(dom.inner_html(root), "<div class=\"c\"><h1>Hi</h1></div>");
	let div = dom.child_nodes(root)[0];
	let h1 = dom.child_nodes(div)[0];
	let texts: Vec<_> = dom.child_nodes(h1).iter().map(|&node| dom.text(node).unwrap()).collect();
	assert_eq!(texts, ["H", "i"]);
}

#[test]
fn scenario_b_link_attributes() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	let link = Element::new("a")
		.attribute("href", "https://x.test")
		.attribute("target", "_blank")
		.child("Link");
	render_naive(&mut dom, &link, &root).unwrap();

	assert_eq!(dom.inner_html(root), "<a href=\"https://x.test\" target=\"_blank\">Link</a>");
}

#[test]
fn scenario_c_style() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	render_naive(&mut dom, &Element::new("h1").style("color", "red").style("textAlign", "center"), &root).unwrap();

	let h1 = dom.child_nodes(root)[0];
	assert_eq!(dom.style_property(h1, "color"), Some("red"));
	assert_eq!(dom.style_property(h1, "textAlign"), Some("center"));
}

#[test]
fn sequences_match_the_optimized_renderer() {
	let tree = Element::new("ul")
		.class_name("list")
		.child(Element::new("li").child("one"))
		.child(Element::new("li").child("two").child(Element::new("em").child("!")));

	let mut naive_dom = MemoryDom::new();
	let naive_root = container(&mut naive_dom);
	render_naive(&mut naive_dom, &tree, &naive_root).unwrap();

	let mut optimized_dom = MemoryDom::new();
	let optimized_root = container(&mut optimized_dom);
	render(&mut optimized_dom, &tree, &optimized_root).unwrap();

	assert_eq!(naive_dom.inner_html(naive_root), optimized_dom.inner_html(optimized_root));
}

#[test]
fn only_known_attributes_are_applied() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	let tree = Element::new("a")
		.class_name("")
		.attribute("id", "link")
		.attribute("href", "")
		.attribute("target", "_self")
		.attribute("title", "ignored")
		.on("click", EventHandler::new(|_| panic!("Handlers are never attached.")));
	render_naive(&mut dom, &tree, &root).unwrap();

	let a = dom.child_nodes(root)[0];
	assert_eq!(dom.inner_html(root), "<a target=\"_self\"></a>");
	assert_eq!(dom.listener_count(a), 0);
	assert_eq!(dom.document_listener_count(), 0);
	assert_eq!(dom.dispatch(a, "click"), Ok(0));
}

#[test]
fn missing_type_reaches_the_runtime() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	let error = render_naive(&mut dom, &Element::default(), &root).unwrap_err();
	assert_eq!(error.host(), Some(&HostError::InvalidTagName(String::new())));
	assert!(dom.child_nodes(root).is_empty());
}

#[test]
fn single_element_child_fails_after_its_type_name() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	let tree = Element::new("p").single_child(Element::new("b").child("x"));
	let error = render_naive(&mut dom, &tree, &root).unwrap_err();

	// The type name became text, then the untyped props were rejected.
	assert_eq!(error.host(), Some(&HostError::InvalidTagName(String::new())));
	assert!(dom.child_nodes(root).is_empty());
	let p = dom.detached_roots().find(|&node| dom.tag_name(node) == Some("p")).unwrap();
	assert_eq!(dom.inner_html(p), "b");
}

#[test]
fn text_sentinel_becomes_an_element() {
	let mut dom = MemoryDom::new();
	let root = container(&mut dom);

	render_naive(&mut dom, &Element::new("div").child(Element::text("x")), &root).unwrap();
	assert_eq!(dom.inner_html(root), "<div><text></text></div>");
}
