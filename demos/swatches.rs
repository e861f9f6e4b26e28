use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use distinct_palette::{simulate, ConfusionType, DistanceType, Generator,
                       Lab, RgbColor, Strategy};

type Err = Box<dyn Error>;

fn css_string(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn row(fh: &mut impl Write, colors: &[RGB8], height: u32,
       comment: &str) -> Result<(), Err> {
    writeln!(fh, "<tr>")?;
    for &c in colors {
        writeln!(fh, "  <td style=\"width: 40px; height: {height}px; \
                      background-color: {}\"></td>",
                 css_string(c))?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td></tr>")?;
    Ok(())
}

/// Show the palette, how dichromats perceive it, and its grayscale
/// version.
fn table_of_colors(fh: &mut impl Write, palette: &[Lab],
                   comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\">")?;
    let colors: Vec<RGB8> = palette.iter().map(|c| c.rgb()).collect();
    row(fh, &colors, 30, comment)?;
    for t in ConfusionType::ALL {
        let seen: Vec<RGB8> = palette.iter()
            .map(|&c| simulate(c, t, 1.).rgb()).collect();
        row(fh, &seen, 20, &t.to_string())?;
    }
    let gray: Vec<RGB8> = colors.iter().map(|c| c.to_gray()).collect();
    row(fh, &gray, 12, "grayscale")?;
    writeln!(fh, "</table><br/>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Distinct_palette: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    for strategy in [Strategy::KMeans, Strategy::ForceDirected] {
        writeln!(fh, "<h3>{strategy}</h3>")?;
        for distance in [DistanceType::Euclidean, DistanceType::Cmc,
                         DistanceType::Compromise,
                         DistanceType::Colorblind(ConfusionType::Deuteranopia)] {
            let palette = Generator::new(8).strategy(strategy)
                .distance(distance).quality(20).seed(1)
                .generate_any()?;
            table_of_colors(&mut fh, &palette, &distance.to_string())?;
        }
    }

    writeln!(fh, "<h3>Pastels</h3>")?;
    let palette = Generator::new(8).seed(1)
        .generate(|c| c.r.min(c.g).min(c.b) > 150.)?;
    table_of_colors(&mut fh, &palette, "min channel > 150")?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
