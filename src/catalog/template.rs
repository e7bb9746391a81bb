use super::models::LaptopRecord;

pub const LAPTOP_TEMPLATE: &str = "template-laptop.html";

fn placeholders(laptop: &LaptopRecord) -> [(&'static str, &str); 8] {
    [
        ("{%PRODUCTNAME%}", laptop.product_name.as_str()),
        ("{%IMAGE%}", laptop.image.as_str()),
        ("{%PRICE%}", laptop.price.as_str()),
        ("{%SCREEN%}", laptop.screen.as_str()),
        ("{%CPU%}", laptop.cpu.as_str()),
        ("{%STORAGE%}", laptop.storage.as_str()),
        ("{%RAM%}", laptop.ram.as_str()),
        ("{%DESCRIPTION%}", laptop.description.as_str()),
    ]
}

/// Replaces every occurrence of the laptop placeholders with the record's
/// fields. Placeholders not in the fixed set are left as they are.
pub fn fill_laptop(template: &str, laptop: &LaptopRecord) -> String {
    placeholders(laptop)
        .iter()
        .fold(template.to_string(), |output, (token, value)| {
            output.replace(token, value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> LaptopRecord {
        LaptopRecord {
            product_name: "Dell XPS 13".into(),
            image: "dell.jpg".into(),
            price: "1199".into(),
            screen: "13.3-inch".into(),
            cpu: "Intel Core i7".into(),
            storage: "512 GB SSD".into(),
            ram: "16 GB".into(),
            description: "Small and fast.".into(),
        }
    }

    #[test]
    fn test_replaces_every_placeholder() {
        let template = placeholders(&laptop())
            .iter()
            .map(|(token, _)| *token)
            .collect::<Vec<_>>()
            .join("|");
        let output = fill_laptop(&template, &laptop());
        assert_eq!(
            output,
            "Dell XPS 13|dell.jpg|1199|13.3-inch|Intel Core i7|512 GB SSD|16 GB|Small and fast."
        );
    }

    #[test]
    fn test_replaces_globally() {
        let output = fill_laptop(
            "<title>{%PRODUCTNAME%}</title><h1>{%PRODUCTNAME%}</h1>",
            &laptop(),
        );
        assert_eq!(output, "<title>Dell XPS 13</title><h1>Dell XPS 13</h1>");
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let output = fill_laptop("{%PRICE%} {%WEIGHT%}", &laptop());
        assert_eq!(output, "1199 {%WEIGHT%}");
    }
}
