use criterion::{criterion_group, criterion_main, Criterion};
use overlay_panel::codec::{decode_into, encode_form};
use overlay_panel::form::OverlayForm;
use url::Url;

fn bench_codec(c: &mut Criterion) {
    let base = Url::parse("http://localhost:5000/").unwrap();
    let query = "font_name=DejaVu+Sans&font_size=72&text_color=%23ff8800&position=top-left\
&text_align=right&x_offset=-15&y_offset=30&bg_color=%23102030&bg_opacity=64&bg_blur=2\
&bg_radius=4&bg_padding=8&box_width_percent=90&sample=beach.jpg";

    c.bench_function("decode_share_url", |b| {
        b.iter(|| {
            let mut form = OverlayForm::new();
            decode_into(query, &mut form)
        })
    });

    let mut form = OverlayForm::new();
    decode_into(query, &mut form);
    c.bench_function("encode_share_url", |b| b.iter(|| encode_form(&base, &form)));
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
