use super::super::Model;
use shared::{ClassifyResponse, Risk};
use yew::prelude::*;

fn risk_class(risk: Risk) -> &'static str {
    match risk {
        Risk::Low => "risk-low",
        Risk::Medium => "risk-medium",
        Risk::High => "risk-high",
        Risk::VeryHigh => "risk-very-high",
    }
}

pub fn render_results(model: &Model) -> Html {
    let name = model.session.profile().display_name().to_string();

    html! {
        <section class="screen screen-results">
            <h2>{ format!("Your results are ready, {}.", name) }</h2>
            <div class="disclaimer">
                <span class="info-icon">{"i"}</span>
                <p>{"This test is not a professional medical diagnosis. It's just a recommendation, always consult a doctor for medical advice."}</p>
            </div>
            {
                match model.session.result() {
                    Some(response) => render_prediction(response),
                    None => html! {
                        <p class="no-results-message">{"No analysis result available."}</p>
                    },
                }
            }
        </section>
    }
}

fn render_prediction(response: &ClassifyResponse) -> Html {
    let prediction = &response.prediction;
    let confidence = prediction.confidence_percent().clamp(0.0, 100.0);

    html! {
        <div class={classes!("results-container", risk_class(prediction.risk))}>
            <div class="result-header">
                <h3>{"You..."}</h3>
                <h2>{ prediction.display_name.clone() }</h2>
                <span class="risk-badge">{ format!("{} risk", prediction.risk) }</span>
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", confidence)}></div>
                    </div>
                    <div class="meter-value">{format!("{:.1}%", confidence)}</div>
                </div>
            </div>
            <p class="result-description">{ prediction.description.clone() }</p>
            <p class="result-recommendation">
                <strong>{"Recommendation: "}</strong>{ prediction.recommendation.clone() }
            </p>
            {
                if let Some(probabilities) = &response.class_probabilities {
                    html! {
                        <div class="detailed-results">
                            <h3>{"Detailed Analysis"}</h3>
                            <div class="result-bars">
                                { for probabilities.iter().map(|(label, &p)| {
                                    let percentage = (p * 100.0).clamp(0.0, 100.0);
                                    html! {
                                        <div class="result-item" key={label.clone()}>
                                            <div class="result-label">{ label.clone() }</div>
                                            <div class="result-bar-container">
                                                <div class="result-bar" style={format!("width: {}%", percentage)}></div>
                                            </div>
                                            <div class="result-value">{ format!("{:.1}%", percentage) }</div>
                                        </div>
                                    }
                                })}
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
